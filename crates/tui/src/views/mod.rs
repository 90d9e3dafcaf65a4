pub mod editor;
pub mod files;
pub mod help;
pub mod login;
pub mod prompt_detail;
pub mod prompt_list;
pub mod settings;
pub mod tab_bar;
