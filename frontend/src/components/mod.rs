pub mod chart;
pub mod dashboard;
pub mod history;
pub mod navigation;
pub mod record_form;
pub mod record_list;
