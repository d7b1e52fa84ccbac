pub mod costing;
pub mod report;
pub mod sales;
pub mod stock;
pub mod whatsapp;
