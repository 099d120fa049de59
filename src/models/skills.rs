use crate::entities::skills::Skill as SkillEntity;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
}

impl From<SkillEntity> for Skill {
    fn from(value: SkillEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
        }
    }
}
