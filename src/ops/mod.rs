pub mod category_ops;
pub mod edit;
pub mod priority;
pub mod schedule_ops;
pub mod task_ops;

/// Fresh identifier for a new category or task.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
