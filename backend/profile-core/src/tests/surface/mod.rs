mod form;
mod menu;
mod notice;
mod toolbar;
