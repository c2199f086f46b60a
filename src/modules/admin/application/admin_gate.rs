use sha2::{Digest, Sha256};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminGateError {
    #[error("Incorrect password!")]
    IncorrectCredential,
}

/// Low-assurance gate in front of the editor: one shared passcode, no users,
/// no lockout. Only the digest of the expected passcode is kept in memory.
#[derive(Clone)]
pub struct AdminGate {
    expected: [u8; 32],
}

impl AdminGate {
    pub fn new(passcode: &str) -> Self {
        Self {
            expected: digest(passcode),
        }
    }

    pub fn verify(&self, candidate: &str) -> Result<(), AdminGateError> {
        let given = digest(candidate);
        let mismatch = self
            .expected
            .iter()
            .zip(given.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if mismatch == 0 {
            info!("Editor credential accepted");
            Ok(())
        } else {
            warn!("Editor credential rejected");
            Err(AdminGateError::IncorrectCredential)
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
