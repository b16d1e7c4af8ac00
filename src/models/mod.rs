pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

pub use comment::{Comment, CommentResponse, CommentSaveRequest, NewComment};
pub use manager::{Manager, ManagerResponse, ManagerSaveRequest, NewManager};
pub use todo::{NewTodo, Page, PageQuery, Todo, TodoResponse, TodoSaveRequest, TodoSaveResponse};
pub use user::{
    ChangePasswordRequest, NewUser, User, UserRole, UserRoleChangeRequest, UserSummary,
    EMAIL_ALREADY_EXISTS,
};
