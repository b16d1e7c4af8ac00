pub mod admin;
pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

use actix_web::web;

/// Registers every `/api` route. Mount inside `web::scope("/api")` wrapped in
/// `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::signin),
    )
    .service(
        web::scope("/users")
            .service(users::change_password)
            .service(users::get_user),
    )
    .service(
        web::scope("/admin")
            .service(admin::change_user_role)
            .service(admin::delete_comment),
    )
    .service(
        web::scope("/todos")
            .service(todos::save_todo)
            .service(todos::get_todos)
            .service(todos::get_todo)
            .service(todos::save_manager)
            .service(todos::get_managers)
            .service(todos::delete_manager)
            .service(todos::save_comment)
            .service(todos::get_comments),
    );
}
