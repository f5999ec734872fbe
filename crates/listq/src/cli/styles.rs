use console::Style;
use once_cell::sync::Lazy;

pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static ID: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static FIELD: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static TAG: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static COUNT: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static WILDCARD: Lazy<Style> = Lazy::new(|| Style::new().italic());
