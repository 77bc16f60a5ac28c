use crate::edit_core::EditBuffer;
use crate::records::{Member, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    FirstName,
    LastName,
    Team,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn flipped(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::FirstName,
            dir: SortDir::Asc,
        }
    }
}

impl SortSpec {
    /// Header-click policy: clicking the active key flips its direction, a
    /// new key starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                dir: self.dir.flipped(),
            }
        } else {
            Self {
                key,
                dir: SortDir::Asc,
            }
        }
    }
}

fn sort_value(member: &Member, key: SortKey) -> String {
    let field = match key {
        SortKey::FirstName => &member.first_name,
        SortKey::LastName => &member.last_name,
        SortKey::Team => &member.team,
    };
    field.as_deref().unwrap_or_default().to_lowercase()
}

fn matches_query(member: &Member, query: &str) -> bool {
    [
        &member.first_name,
        &member.last_name,
        &member.team,
        &member.role,
    ]
    .iter()
    .any(|field| field.as_deref().unwrap_or_default().to_lowercase().contains(query))
}

/// Sorted, filtered view of the members in the buffer. Pure: the buffer is
/// never reordered in place, and equal sort keys keep their buffer order.
///
/// A blank or whitespace-only query skips filtering entirely. A non-blank
/// query is matched as typed, untrimmed, case-insensitively against first
/// name, last name, team and role.
pub fn project(buffer: &EditBuffer, spec: SortSpec, query: &str) -> Vec<Member> {
    let mut rows: Vec<Member> = buffer
        .records()
        .iter()
        .filter_map(Record::as_member)
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        let ordering = sort_value(a, spec.key).cmp(&sort_value(b, spec.key));
        match spec.dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });

    if query.trim().is_empty() {
        return rows;
    }

    let query = query.to_lowercase();
    rows.retain(|member| matches_query(member, &query));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Post, RecordId};

    fn member(id: RecordId, first: &str, last: &str, team: &str, role: &str) -> Member {
        let filled = |value: &str| (!value.is_empty()).then(|| value.to_string());
        Member {
            id,
            first_name: filled(first),
            last_name: filled(last),
            team: filled(team),
            role: filled(role),
            bio: None,
            link: None,
        }
    }

    fn roster() -> EditBuffer {
        let mut buffer = EditBuffer::new();
        buffer.seed(vec![
            Record::Member(member(1, "Bo", "Ortiz", "Software", "Lead")),
            Record::Member(member(2, "Amy", "Zhou", "Outreach", "Coordinator")),
            Record::Member(member(3, "Cid", "Ayers", "Software", "Developer")),
        ]);
        buffer
    }

    fn ids(rows: &[Member]) -> Vec<RecordId> {
        rows.iter().map(|row| row.id).collect()
    }

    #[test]
    fn default_sort_is_first_name_ascending() {
        let rows = project(&roster(), SortSpec::default(), "");
        assert_eq!(ids(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn descending_reverses_the_comparison() {
        let spec = SortSpec {
            key: SortKey::FirstName,
            dir: SortDir::Desc,
        };
        let rows = project(&roster(), spec, "");
        assert_eq!(ids(&rows), vec![3, 1, 2]);
    }

    #[test]
    fn sort_ignores_letter_case() {
        let mut buffer = EditBuffer::new();
        buffer.seed(vec![
            Record::Member(member(1, "zoe", "", "", "")),
            Record::Member(member(2, "Ada", "", "", "")),
            Record::Member(member(3, "MEL", "", "", "")),
        ]);
        let rows = project(&buffer, SortSpec::default(), "");
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn missing_keys_sort_as_empty_strings() {
        let mut buffer = EditBuffer::new();
        buffer.seed(vec![
            Record::Member(member(1, "Bo", "", "", "")),
            Record::Member(member(2, "", "", "", "")),
        ]);

        let ascending = project(&buffer, SortSpec::default(), "");
        assert_eq!(ids(&ascending), vec![2, 1]);

        let spec = SortSpec {
            key: SortKey::FirstName,
            dir: SortDir::Desc,
        };
        let descending = project(&buffer, spec, "");
        assert_eq!(ids(&descending), vec![1, 2]);
    }

    #[test]
    fn equal_keys_keep_buffer_order_in_both_directions() {
        let mut buffer = EditBuffer::new();
        buffer.seed(vec![
            Record::Member(member(1, "Sam", "Young", "", "")),
            Record::Member(member(2, "Sam", "Abel", "", "")),
            Record::Member(member(3, "Sam", "Moss", "", "")),
        ]);

        let ascending = project(&buffer, SortSpec::default(), "");
        assert_eq!(ids(&ascending), vec![1, 2, 3]);

        let spec = SortSpec {
            key: SortKey::FirstName,
            dir: SortDir::Desc,
        };
        let descending = project(&buffer, spec, "");
        assert_eq!(ids(&descending), vec![1, 2, 3]);
    }

    #[test]
    fn toggling_the_same_key_twice_restores_the_direction() {
        let spec = SortSpec::default();
        let flipped = spec.toggled(SortKey::FirstName);
        assert_eq!(flipped.dir, SortDir::Desc);

        let restored = flipped.toggled(SortKey::FirstName);
        assert_eq!(restored, spec);
        assert_eq!(project(&roster(), restored, ""), project(&roster(), spec, ""));
    }

    #[test]
    fn switching_keys_resets_to_ascending() {
        let spec = SortSpec {
            key: SortKey::FirstName,
            dir: SortDir::Desc,
        };
        let switched = spec.toggled(SortKey::Team);
        assert_eq!(switched.key, SortKey::Team);
        assert_eq!(switched.dir, SortDir::Asc);
    }

    #[test]
    fn blank_query_returns_every_row() {
        let all = project(&roster(), SortSpec::default(), "");
        let spaced = project(&roster(), SortSpec::default(), "   ");
        assert_eq!(ids(&spaced), ids(&all));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn query_matches_any_listed_field_case_insensitively() {
        let by_first = project(&roster(), SortSpec::default(), "AMY");
        assert_eq!(ids(&by_first), vec![2]);

        let by_team = project(&roster(), SortSpec::default(), "software");
        assert_eq!(ids(&by_team), vec![1, 3]);

        let by_role = project(&roster(), SortSpec::default(), "coordinator");
        assert_eq!(ids(&by_role), vec![2]);
    }

    #[test]
    fn query_is_matched_untrimmed() {
        let mut buffer = EditBuffer::new();
        buffer.seed(vec![
            Record::Member(member(1, "Bo", "", "", "")),
            Record::Member(member(2, "Jim Bo", "", "", "")),
        ]);

        let rows = project(&buffer, SortSpec::default(), " bo");
        assert_eq!(ids(&rows), vec![2]);
    }

    #[test]
    fn filtered_rows_keep_the_sorted_order() {
        let spec = SortSpec {
            key: SortKey::FirstName,
            dir: SortDir::Desc,
        };
        let rows = project(&roster(), spec, "software");
        assert_eq!(ids(&rows), vec![3, 1]);
    }

    #[test]
    fn projection_leaves_the_buffer_alone() {
        let buffer = roster();
        let before = buffer.clone();

        let spec = SortSpec {
            key: SortKey::Team,
            dir: SortDir::Desc,
        };
        project(&buffer, spec, "zh");

        assert_eq!(buffer, before);
    }

    #[test]
    fn posts_in_the_buffer_are_not_projected() {
        let mut buffer = roster();
        let mut records = buffer.records().to_vec();
        records.push(Record::Post(Post {
            id: 50,
            ..Post::default()
        }));
        buffer.seed(records);

        let rows = project(&buffer, SortSpec::default(), "");
        assert_eq!(rows.len(), 3);
    }
}
