use crate::core::data::band::Band;

/// Receives bands in emission order.
pub trait BandSink {
    fn emit(&mut self, band: Band);
}

impl<F> BandSink for F
where
    F: FnMut(Band),
{
    #[inline]
    fn emit(&mut self, band: Band) {
        self(band)
    }
}
