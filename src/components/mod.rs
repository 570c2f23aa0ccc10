//! UI Components
//!
//! Pages and the pieces they are built from.

mod delete_confirm_button;
mod edit_todo_modal;
mod forgot_password_modal;
mod header;
mod login_page;
mod new_todo_form;
mod profile_page;
mod signup_page;
mod status_banner;
mod todo_card;
mod todo_list_page;

pub use delete_confirm_button::DeleteConfirmButton;
pub use edit_todo_modal::EditTodoModal;
pub use forgot_password_modal::ForgotPasswordModal;
pub use header::Header;
pub use login_page::LoginPage;
pub use new_todo_form::NewTodoForm;
pub use profile_page::ProfilePage;
pub use signup_page::SignupPage;
pub use status_banner::StatusBanner;
pub use todo_card::TodoCard;
pub use todo_list_page::TodoListPage;
