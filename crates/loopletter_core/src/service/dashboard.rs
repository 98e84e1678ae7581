//! Dashboard card projection.

use crate::model::loop_record::{Loop, LoopId};
use chrono::DateTime;
use serde::Serialize;

/// Member avatars shown on a card before collapsing into `+N`.
pub const AVATAR_PREVIEW_LIMIT: usize = 4;
/// Next-send label for loops without a planned send.
pub const UNSCHEDULED_LABEL: &str = "Set Schedule";

/// Summary of one loop for the dashboard grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoopCard {
    pub id: LoopId,
    pub name: String,
    pub description: String,
    pub category_label: &'static str,
    pub category_icon: &'static str,
    pub frequency_label: &'static str,
    pub header_image: Option<String>,
    /// First `AVATAR_PREVIEW_LIMIT` member avatars.
    pub avatar_preview: Vec<String>,
    /// Members not covered by `avatar_preview`.
    pub hidden_member_count: usize,
    pub next_send_label: String,
}

impl LoopCard {
    pub fn from_loop(source: &Loop) -> Self {
        Self {
            id: source.id.clone(),
            name: source.name.clone(),
            description: source.description.clone(),
            category_label: source.category.label(),
            category_icon: source.category.icon(),
            frequency_label: source.frequency.label(),
            header_image: source.header_image.clone(),
            avatar_preview: source
                .members
                .iter()
                .take(AVATAR_PREVIEW_LIMIT)
                .map(|member| member.avatar.clone())
                .collect(),
            hidden_member_count: source.members.len().saturating_sub(AVATAR_PREVIEW_LIMIT),
            next_send_label: source
                .next_send_date
                .and_then(DateTime::from_timestamp_millis)
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| UNSCHEDULED_LABEL.to_string()),
        }
    }
}

/// Cards for every loop, in input order.
pub fn summarize(loops: &[Loop]) -> Vec<LoopCard> {
    loops.iter().map(LoopCard::from_loop).collect()
}

#[cfg(test)]
mod tests {
    use super::{summarize, LoopCard, UNSCHEDULED_LABEL};
    use crate::model::loop_record::{Category, Frequency, Loop};
    use crate::model::records::Member;

    fn member(n: usize) -> Member {
        Member {
            id: format!("m-{n}"),
            name: format!("Member {n}"),
            email: format!("m{n}@example.com"),
            avatar: format!("avatar-{n}.png"),
        }
    }

    #[test]
    fn card_collapses_members_beyond_preview_limit() {
        let mut record = Loop::new("loop-1", "Crew");
        record.members = (1..=6).map(member).collect();
        let card = LoopCard::from_loop(&record);
        assert_eq!(card.avatar_preview.len(), 4);
        assert_eq!(card.avatar_preview[0], "avatar-1.png");
        assert_eq!(card.hidden_member_count, 2);
    }

    #[test]
    fn card_labels_category_frequency_and_schedule() {
        let mut record = Loop::new("loop-1", "Crew");
        record.category = Category::Friends;
        record.frequency = Frequency::Weekly;
        let card = LoopCard::from_loop(&record);
        assert_eq!(card.category_label, "Friends");
        assert_eq!(card.frequency_label, "Weekly");
        assert_eq!(card.next_send_label, UNSCHEDULED_LABEL);

        record.next_send_date = Some(1_772_712_000_000);
        assert_eq!(LoopCard::from_loop(&record).next_send_label, "2026-03-05");
    }

    #[test]
    fn summarize_preserves_order() {
        let cards = summarize(&[Loop::new("a", "A"), Loop::new("b", "B")]);
        let ids = cards.iter().map(|card| card.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
