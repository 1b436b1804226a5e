/// Entities carrying a monetary amount that feeds budget totals.
pub trait Amounted {
    fn amount(&self) -> f64;
}
