use std::collections::HashSet;

use strum::{Display, EnumString};

use super::document::DocumentDigest;
use crate::config::core_config::{SignatureConfig, StepUpConfig};

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, Hash)]
pub enum SigningMode {
    #[strum(serialize = "static")]
    Static,
    #[strum(serialize = "ondemand")]
    OnDemand,
    #[strum(serialize = "ondemand-stepup")]
    OnDemandWithStepUp,
    #[strum(serialize = "timestamp")]
    Timestamp,
    /// ETSI remote signing with user authorization
    #[strum(serialize = "etsi")]
    Interactive,
}

impl SigningMode {
    pub fn is_on_demand(&self) -> bool {
        matches!(self, Self::OnDemand | Self::OnDemandWithStepUp)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimedIdentity {
    pub name: String,
    pub key: Option<String>,
}

impl ClaimedIdentity {
    /// `name:key` for on-demand certificates, plain `name` otherwise
    pub fn qualified(&self, mode: SigningMode) -> String {
        match (&self.key, mode.is_on_demand()) {
            (Some(key), true) => format!("{}:{key}", self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateRequest {
    pub distinguished_name: String,
    pub step_up: Option<StepUp>,
}

/// Mobile ID consent prompt sent to the signer's phone
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepUp {
    pub msisdn: String,
    pub message: String,
    pub language: String,
    pub serial_number: Option<String>,
}

impl From<StepUpConfig> for StepUp {
    fn from(value: StepUpConfig) -> Self {
        Self {
            msisdn: value.msisdn,
            message: value.message,
            language: value.language,
            serial_number: value.serial_number,
        }
    }
}

/// One invocation's worth of documents. Order is significant: outcomes are
/// returned in the same order.
#[derive(Clone, Debug)]
pub struct SigningBatch<'a> {
    pub documents: &'a [DocumentDigest],
    pub profile: String,
    pub claimed_identity: ClaimedIdentity,
    pub mode: SigningMode,
    pub certificate_request: Option<CertificateRequest>,
}

impl<'a> SigningBatch<'a> {
    pub fn new(
        documents: &'a [DocumentDigest],
        mode: SigningMode,
        config: &SignatureConfig,
    ) -> Self {
        let certificate_request = match (mode.is_on_demand(), &config.distinguished_name) {
            (true, Some(distinguished_name)) => Some(CertificateRequest {
                distinguished_name: distinguished_name.to_owned(),
                step_up: match mode {
                    SigningMode::OnDemandWithStepUp => config.step_up.clone().map(Into::into),
                    _ => None,
                },
            }),
            _ => None,
        };

        Self {
            documents,
            profile: config.profile.to_owned(),
            claimed_identity: ClaimedIdentity {
                name: config.claimed_identity_name.to_owned(),
                key: config.claimed_identity_key.to_owned(),
            },
            mode,
            certificate_request,
        }
    }

    /// Checks that can be made before anything is sent
    pub fn validate(&self) -> Result<(), String> {
        if self.documents.is_empty() {
            return Err("no documents to sign".to_string());
        }

        let mut ids = HashSet::new();
        if let Some(duplicate) = self
            .documents
            .iter()
            .find(|document| !ids.insert(document.id.as_str()))
        {
            return Err(format!("duplicate document id `{}`", duplicate.id));
        }

        if self.mode.is_on_demand() {
            if self.claimed_identity.key.is_none() {
                return Err(format!(
                    "mode `{}` requires a claimed identity key",
                    self.mode
                ));
            }
            if self.certificate_request.is_none() {
                return Err(format!(
                    "mode `{}` requires a distinguished name",
                    self.mode
                ));
            }
        }

        if self.mode == SigningMode::Interactive
            && self
                .documents
                .iter()
                .any(|document| document.algorithm != self.documents[0].algorithm)
        {
            return Err("interactive signing requires one digest algorithm for all documents".to_string());
        }

        if self.mode == SigningMode::OnDemandWithStepUp
            && self
                .certificate_request
                .as_ref()
                .is_none_or(|request| request.step_up.is_none())
        {
            return Err("mode `ondemand-stepup` requires step-up data".to_string());
        }

        Ok(())
    }
}
