/// Additive identity, the starting point of an accumulation.
pub trait Zero {
    const ZERO: Self;
}

impl Zero for f64 {
    const ZERO: Self = 0.0;
}
