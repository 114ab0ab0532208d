//! Section Parsers
//!
//! データドメインごとに1つずつ用意された、生の行データ → 型付きレコードの変換。
//! すべてのパーサーは行データのみを入力とする純粋関数で、エラーを返しません。
//! 欠落したシートは空スライスとして渡され、空の結果（または0・`None`）に縮退します。

mod aggregate;
mod counselling;
mod enrollment;
mod exam;
mod highlights;
mod internship;
mod lecture;
mod schedule;

pub use aggregate::parse_sum_metric;
pub use counselling::parse_counselling;
pub use enrollment::parse_enrollments;
pub use exam::{parse_exam_status, resolve_percentage};
pub use highlights::parse_highlights;
pub use internship::parse_internship;
pub use lecture::parse_lecture_breakdown;
pub use schedule::parse_schedule;
