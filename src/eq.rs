use subtle::ConstantTimeEq;

/// Byte equality whose running time does not depend on where the inputs first differ.
///
/// Slices of different length compare unequal.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
