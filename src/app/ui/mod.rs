mod details;
mod documents;
mod panels;
