//! UI Components
//!
//! View renderers: read the UI state, produce markup, and wire user input
//! back into the store or the document facade.

mod auth_view;
mod dashboard;
mod delete_confirm_button;
mod new_renter_form;
mod reminder_badge;
mod renter_card;
mod renter_drawer;
mod renter_list;

pub use auth_view::AuthView;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use new_renter_form::NewRenterForm;
pub use reminder_badge::ReminderBadge;
pub use renter_card::RenterCard;
pub use renter_drawer::RenterDrawer;
pub use renter_list::RenterList;
