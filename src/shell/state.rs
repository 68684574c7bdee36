use std::sync::Arc;

use crate::modules::attendance::use_cases::list_attendance::handler::ListAttendanceHandler;
use crate::modules::attendance::use_cases::register_attendance::handler::RegisterAttendanceHandler;
use crate::shared::infrastructure::directory::Directory;

#[derive(Clone)]
pub struct AppState {
    pub register_handler: Arc<RegisterAttendanceHandler>,
    pub list_handler: Arc<ListAttendanceHandler>,
    pub directory: Arc<dyn Directory>,
}
