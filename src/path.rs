//! Folder paths.
//!
//! Jenkins nests jobs inside folders with URLs like `job/team/job/backend/job/build`,
//! where every folder name is preceded by a literal `job` segment.

const JOB: &str = "job";

/// Rewrite a folder path like `team/backend` into `job/team/job/backend`.
///
/// Empty segments (leading, trailing or doubled `/`) are dropped and segments
/// which already come after a `job` segment are not prefixed again, so
/// `job/team/job/backend` is returned as-is.
pub fn folder_path(folder: &str) -> String {
    let mut skip_prefix = false;
    let segments: Vec<String> = folder
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment == JOB {
                skip_prefix = true;
                segment.to_string()
            } else if skip_prefix {
                skip_prefix = false;
                segment.to_string()
            } else {
                format!("{}/{}", JOB, segment)
            }
        })
        .collect();
    if segments.is_empty() {
        format!("{}/{}", JOB, folder)
    } else {
        segments.join("/")
    }
}

/// URL path segments of a folder, empty for the root.
///
/// A folder which names no folder at all, like `/` or a bare `job`, is the root.
pub(crate) fn folder_segments(folder: Option<&str>) -> Vec<String> {
    let folder = match folder {
        Some(folder) if folder.split('/').any(|s| !s.is_empty() && s != JOB) => folder,
        _ => return Vec::new(),
    };
    folder_path(folder)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// URL path segments of a job, i.e. `job/{name}` after its folder.
pub(crate) fn job_segments(folder: Option<&str>, job: &str) -> Vec<String> {
    let mut segments = folder_segments(folder);
    segments.push(JOB.to_string());
    segments.push(job.to_string());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("a/b", "job/a/job/b")]
    #[case("job/a/job/b", "job/a/job/b")]
    #[case("/a/b/", "job/a/job/b")]
    #[case("a", "job/a")]
    #[case("a//b", "job/a/job/b")]
    #[case("job/a/b", "job/a/job/b")]
    fn test_folder_path(#[case] folder: &str, #[case] expected: &str) {
        assert_eq!(folder_path(folder), expected);
    }

    #[rstest]
    #[case("a/b")]
    #[case("/team/backend/")]
    fn test_folder_path_idempotent(#[case] folder: &str) {
        let once = folder_path(folder);
        assert_eq!(folder_path(&once), once);
    }

    #[rstest]
    #[case(None, vec![])]
    #[case(Some(""), vec![])]
    #[case(Some("/"), vec![])]
    #[case(Some("//"), vec![])]
    #[case(Some("job"), vec![])]
    #[case(Some("/job/"), vec![])]
    #[case(Some("job/a"), vec!["job", "a"])]
    #[case(Some("a/b"), vec!["job", "a", "job", "b"])]
    fn test_folder_segments(#[case] folder: Option<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(folder_segments(folder), expected);
    }

    #[rstest]
    fn test_job_segments() {
        assert_eq!(
            job_segments(Some("team"), "my job"),
            vec!["job", "team", "job", "my job"]
        );
        assert_eq!(job_segments(None, "DevTest"), vec!["job", "DevTest"]);
        assert_eq!(job_segments(Some("/"), "DevTest"), vec!["job", "DevTest"]);
    }
}
