//! ハイライト（ゲスト講義とイベント）
//!
//! 1枚のシートに形の異なる2種類の表が縦に積まれています。
//! 上段はゲスト講義（9列）、列1に`Event`と書かれた見出し行を境に、下段はイベント（名前・日付）です。
//!
//! ```text
//! | No | Date   | Time  | Venue | Person | Qualifications | Topic | Subject | Batch |
//! | 1  | 05 Feb | 10:00 | LH1   | ...                                                |
//! |    | Event  | Date  |                                                            |
//! |    | Sports Day | 12 Feb |                                                       |
//! ```

use crate::api::DateFormat;
use crate::formatter::DateFormatter;
use crate::model::{Event, GuestLecture, HighlightsData};
use crate::types::{cell, CellValue, Row};

/// イベント部の開始を示す見出し（列1、大文字小文字を区別しない）
const EVENT_SENTINEL: &str = "event";

/// 走査の段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    GuestLectures,
    Events,
}

/// ハイライトシートを解析する
///
/// 見出し行を越えた後は、ゲスト講義の形をした行もイベントとして扱われます。
pub fn parse_highlights(rows: &[Row], format: &DateFormat) -> HighlightsData {
    let formatter = DateFormatter::new(format);
    let mut data = HighlightsData::default();
    let mut phase = Phase::GuestLectures;

    for r in rows.iter().skip(1) {
        match phase {
            Phase::GuestLectures => {
                if is_event_sentinel(cell(r, 1)) {
                    phase = Phase::Events;
                    continue;
                }
                if let Some(lecture) = guest_lecture(r, &formatter) {
                    data.guest_lectures.push(lecture);
                }
            }
            Phase::Events => {
                let name = formatter.display(cell(r, 1));
                if !name.is_empty() {
                    data.events.push(Event {
                        name,
                        date: formatter.display(cell(r, 2)),
                    });
                }
            }
        }
    }

    data
}

fn is_event_sentinel(value: &CellValue) -> bool {
    value.is_present() && value.as_raw_string().trim().to_lowercase() == EVENT_SENTINEL
}

/// 列0が通し番号（数値、または数値として解釈できる文字列）の行をゲスト講義として読む
fn guest_lecture(r: &[CellValue], formatter: &DateFormatter) -> Option<GuestLecture> {
    let no = match cell(r, 0) {
        CellValue::Number(n) if *n != 0.0 && n.is_finite() => *n,
        CellValue::String(s) if !s.trim().is_empty() => crate::types::parse_number(s)?,
        _ => return None,
    };

    let text = |col: usize| formatter.display(cell(r, col));
    Some(GuestLecture {
        no,
        date: text(1),
        time: text(2),
        venue: text(3),
        person: text(4),
        qualifications: text(5),
        topic: text(6),
        subject: text(7),
        batch: text(8),
    })
}
