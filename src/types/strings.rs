use aliri_braid::braid;

/// Jenkins user's username (also called the user ID).
#[braid(serde)]
pub struct Username;

/// Colored status ball of a job, e.g. `blue`, `red_anime` or `notbuilt`.
#[braid(serde)]
pub struct BallColor;
