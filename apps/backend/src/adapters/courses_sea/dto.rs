//! DTOs for courses_sea adapter.

/// DTO for creating a new course.
#[derive(Debug, Clone)]
pub struct CourseCreate {
    pub name: String,
    pub hole_count: i16,
    pub location: String,
}

impl CourseCreate {
    pub fn new(name: impl Into<String>, hole_count: i16, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hole_count,
            location: location.into(),
        }
    }
}

/// DTO for editing one hole's par and length.
#[derive(Debug, Clone)]
pub struct HoleUpdate {
    pub course_id: i64,
    pub hole_number: i16,
    pub par: i16,
    pub length: Option<i32>,
}
