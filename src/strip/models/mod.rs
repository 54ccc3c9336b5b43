pub mod strip_report;
