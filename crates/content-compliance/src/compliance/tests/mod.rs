mod common;

mod catalog;
mod remediation;
