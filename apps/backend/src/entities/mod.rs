pub mod course_holes;
pub mod courses;
pub mod round_scores;
pub mod rounds;
pub mod users;

pub use course_holes::Entity as CourseHoles;
pub use course_holes::Model as CourseHole;
pub use courses::Entity as Courses;
pub use courses::Model as Course;
pub use round_scores::Entity as RoundScores;
pub use round_scores::Model as RoundScore;
pub use rounds::Entity as Rounds;
pub use rounds::Model as Round;
pub use users::Entity as Users;
pub use users::Model as User;
