use strum_macros::{Display, EnumIter, EnumString};

/// Kind of project a visitor is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectType {
    Landing,
    Website,
    Ecommerce,
    InfoApp,
    BookingApp,
    Custom,
}
