use crate::entities::availability::Availability;
use crate::entities::employee_profiles::WorkerRow;
use crate::entities::skills::ProfileSkillRow;
use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Skill-id filter accepted in two shapes: a list of ids, or a single
/// comma-separated string. Entries that do not parse as ids are dropped and
/// any other shape degrades to an empty (no-op) filter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SkillIds(pub Vec<i64>);

impl<'de> Deserialize<'de> for SkillIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SkillIdsVisitor;

        impl<'de> Visitor<'de> for SkillIdsVisitor {
            type Value = SkillIds;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of skill ids or a comma-separated string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                let ids = v
                    .split(',')
                    .filter_map(|part| part.trim().parse::<i64>().ok())
                    .collect();
                Ok(SkillIds(ids))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(SkillIds(vec![v]))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(SkillIds(vec![v as i64]))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut ids = Vec::new();
                while let Some(id) = seq.next_element::<LooseSkillId>()? {
                    if let Some(id) = id.0 {
                        ids.push(id);
                    }
                }
                Ok(SkillIds(ids))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(SkillIds::default())
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(SkillIds::default())
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(SkillIds::default())
            }
        }

        deserializer.deserialize_any(SkillIdsVisitor)
    }
}

/// One element of a skill-id list; unparsable entries become `None`.
struct LooseSkillId(Option<i64>);

impl<'de> Deserialize<'de> for LooseSkillId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LooseSkillIdVisitor;

        impl<'de> Visitor<'de> for LooseSkillIdVisitor {
            type Value = LooseSkillId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a skill id")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(LooseSkillId(Some(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(LooseSkillId(Some(v as i64)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(LooseSkillId(v.trim().parse().ok()))
            }
        }

        deserializer.deserialize_any(LooseSkillIdVisitor)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WorkerSort {
    #[default]
    Newest,
    RateHigh,
    RateLow,
}

impl WorkerSort {
    /// No aggregate rating column exists; `rating` orders like `newest`.
    /// Unknown values also degrade to the default instead of erroring.
    pub fn from_param(param: &str) -> Self {
        match param {
            "rate_high" => WorkerSort::RateHigh,
            "rate_low" => WorkerSort::RateLow,
            _ => WorkerSort::Newest,
        }
    }
}

impl<'de> Deserialize<'de> for WorkerSort {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let param = String::deserialize(deserializer)?;
        Ok(WorkerSort::from_param(&param))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorkerFilters {
    pub search: Option<String>,
    pub skills: Option<SkillIds>,
    pub location: Option<String>,
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub availability: Option<String>,
    pub sort: WorkerSort,
    pub page: Option<u32>,
}

impl WorkerFilters {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn search_term(&self) -> Option<&str> {
        non_empty(self.search.as_deref())
    }

    pub fn location_term(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }

    pub fn skill_ids(&self) -> Option<&[i64]> {
        self.skills
            .as_ref()
            .map(|ids| ids.0.as_slice())
            .filter(|ids| !ids.is_empty())
    }

    pub fn only_available(&self) -> bool {
        matches!(self.availability.as_deref(), Some("available"))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Strips the photo path down to a store-relative path, or `None` when the
/// stored value cannot be trusted. Absolute URLs are cleared rather than
/// probed; `storage/` prefixes are stripped however many times they occur.
pub fn normalize_photo_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return None;
    }
    let mut path = trimmed.trim_start_matches('/');
    while let Some(rest) = path.strip_prefix("storage/") {
        path = rest.trim_start_matches('/');
    }
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct SkillSummary {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub proficiency_level: String,
}

impl From<ProfileSkillRow> for SkillSummary {
    fn from(row: ProfileSkillRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            proficiency_level: row.proficiency_level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Worker {
    pub user_id: i64,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub hourly_rate_min: Option<Decimal>,
    pub profile_photo: Option<String>,
    pub skills: Vec<SkillSummary>,
    pub member_since: DateTime<Utc>,
}

impl Worker {
    pub fn from_row(
        row: WorkerRow,
        skills: Vec<SkillSummary>,
        profile_photo: Option<String>,
    ) -> Self {
        let display_name = row
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("{} {}", row.first_name, row.last_name));
        Self {
            user_id: row.user_id,
            display_name,
            first_name: row.first_name,
            last_name: row.last_name,
            bio: row.bio,
            city: row.city,
            province: row.province,
            hourly_rate_min: row.hourly_rate_min,
            profile_photo,
            skills,
            member_since: row.profile_created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilitySlot {
    pub day_of_week: i8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl From<Availability> for AvailabilitySlot {
    fn from(row: Availability) -> Self {
        Self {
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkerDetail {
    #[serde(flatten)]
    pub worker: Worker,
    pub email: String,
    pub availability: Vec<AvailabilitySlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_accept_comma_separated_string() {
        let parsed: SkillIds = serde_json::from_str(r#""1, 2,x,4""#).unwrap();
        assert_eq!(parsed, SkillIds(vec![1, 2, 4]));
    }

    #[test]
    fn skills_accept_list_with_mixed_entries() {
        let parsed: SkillIds = serde_json::from_str(r#"[1, "2", "x", 3]"#).unwrap();
        assert_eq!(parsed, SkillIds(vec![1, 2, 3]));
    }

    #[test]
    fn malformed_skills_degrade_to_no_filter() {
        let parsed: SkillIds = serde_json::from_str(r#"{"a": 1}"#).unwrap();
        assert_eq!(parsed, SkillIds::default());

        let parsed: SkillIds = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, SkillIds::default());
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        assert_eq!(WorkerSort::from_param("rating"), WorkerSort::Newest);
        assert_eq!(WorkerSort::from_param("bogus"), WorkerSort::Newest);
        assert_eq!(WorkerSort::from_param("rate_high"), WorkerSort::RateHigh);
        assert_eq!(WorkerSort::from_param("rate_low"), WorkerSort::RateLow);
    }

    #[test]
    fn blank_terms_are_not_filters() {
        let filters = WorkerFilters {
            search: Some("   ".into()),
            location: Some(String::new()),
            skills: Some(SkillIds::default()),
            ..Default::default()
        };
        assert_eq!(filters.search_term(), None);
        assert_eq!(filters.location_term(), None);
        assert_eq!(filters.skill_ids(), None);
        assert!(!filters.only_available());
    }

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(WorkerFilters::default().page(), 1);
        let filters = WorkerFilters {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(filters.page(), 1);
    }

    #[test]
    fn normalize_strips_storage_prefixes() {
        assert_eq!(
            normalize_photo_path("storage/photos/a.jpg").as_deref(),
            Some("photos/a.jpg")
        );
        assert_eq!(
            normalize_photo_path("/storage/photos/a.jpg").as_deref(),
            Some("photos/a.jpg")
        );
        assert_eq!(
            normalize_photo_path("storage/storage/photos/a.jpg").as_deref(),
            Some("photos/a.jpg")
        );
        assert_eq!(
            normalize_photo_path("photos/a.jpg").as_deref(),
            Some("photos/a.jpg")
        );
    }

    #[test]
    fn normalize_clears_absolute_urls_and_empties() {
        assert_eq!(normalize_photo_path("http://broken-cdn.example/x.jpg"), None);
        assert_eq!(normalize_photo_path("HTTPS://cdn.example/x.jpg"), None);
        assert_eq!(normalize_photo_path("   "), None);
        assert_eq!(normalize_photo_path("storage/"), None);
    }
}
