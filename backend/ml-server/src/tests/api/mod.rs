mod error;
mod web_root;
