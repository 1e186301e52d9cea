mod catalog;
mod search;
