//! Postal-code (CEP) address autofill
//!
//! Brazilian postal codes are 8 digits; a complete code can be resolved to a
//! street-level address. Autofill is strictly best-effort: an incomplete
//! code is skipped, and a miss or transport failure leaves the draft
//! untouched so the user can type the address by hand.

use tracing::{debug, warn};

use crate::draft::Draft;
use crate::ports::PostalLookupPort;

/// Resolves the draft's postal code and fills the address fields
///
/// No-op unless the code has exactly 8 digits. On a hit the street,
/// neighborhood, city and state are filled and locked against manual edits.
/// Returns whether the draft was modified.
pub async fn fill_address_from_lookup(draft: &mut Draft, port: &dyn PostalLookupPort) -> bool {
    let code = draft.postal_code.clone();
    if code.len() != 8 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match port.lookup(&code, None).await {
        Ok(Some(address)) => {
            debug!(postal_code = %code, city = %address.city, "postal lookup hit");
            draft.apply_postal_autofill(address);
            true
        }
        Ok(None) => {
            debug!(postal_code = %code, "postal lookup miss");
            false
        }
        Err(error) => {
            warn!(postal_code = %code, %error, "postal lookup failed");
            false
        }
    }
}
