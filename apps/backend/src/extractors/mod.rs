pub mod current_user;
pub mod path_params;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use path_params::{CourseName, HoleNumber, RoundId};
pub use validated_json::ValidatedJson;
