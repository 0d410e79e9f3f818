/// Highest reputation a user can reach
pub const MAX_FEEDBACK_SCORE: i32 = 100;

/// Points a single star is worth on the 0-100 reputation scale
const POINTS_PER_STAR: i32 = 20;

/// Fold a 1-5 star rating into a running reputation average
///
/// Returns the new `(score, count)` pair. The score is truncated toward zero
/// and never exceeds [`MAX_FEEDBACK_SCORE`].
pub fn apply_rating(old_score: i32, old_count: i32, rating: i32) -> (i32, i32) {
    let count = old_count.max(0) + 1;
    let scaled = i64::from(rating * POINTS_PER_STAR);
    let total = i64::from(old_score) * i64::from(old_count.max(0)) + scaled;
    let average = (total / i64::from(count)).min(i64::from(MAX_FEEDBACK_SCORE));

    (i32::try_from(average).unwrap_or(MAX_FEEDBACK_SCORE), count)
}
