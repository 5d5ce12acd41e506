use uuid::Uuid;

/// Fresh id for a user-created dressing
pub fn generate_dressing_id() -> String {
    format!("dr_{}", Uuid::new_v4().simple())
}

pub fn generate_project_id() -> Uuid {
    Uuid::new_v4()
}
