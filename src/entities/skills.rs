#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ProfileSkillRow {
    pub employee_profile_id: i64,
    pub id: i64,
    pub name: String,
    pub category: String,
    pub proficiency_level: String,
}
