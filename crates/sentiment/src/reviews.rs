//! Splitting a movie's review blob into individual reviews.

/// Placeholder the dataset stores when a movie has no reviews
pub const NO_REVIEWS_SENTINEL: &str = "no reviews available";

/// True when `text` is the no-reviews placeholder (any case, any padding)
pub fn is_no_reviews(text: &str) -> bool {
    text.trim().to_lowercase() == NO_REVIEWS_SENTINEL
}

/// Split a review blob into trimmed, non-empty reviews.
///
/// Reviews are separated by blank lines (lines holding only whitespace).
/// Missing text and the no-reviews placeholder yield an empty list.
/// Output order follows the input.
pub fn split_reviews(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };
    if is_no_reviews(text) {
        return Vec::new();
    }

    let mut reviews = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    // `lines()` also strips the '\r' of CRLF endings
    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut current, &mut reviews);
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut reviews);

    reviews
}

fn flush(current: &mut Vec<&str>, reviews: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let joined = current.join("\n");
    let review = joined.trim();
    if !review.is_empty() {
        reviews.push(review.to_string());
    }
    current.clear();
}
