//! Credential model: names, types, values, generation parameters and the
//! request/response bodies of the `/api/v1/data` endpoints.

pub mod details;
pub mod name;
pub mod parameters;
pub mod request;
pub mod secret;
pub mod types;
pub mod value;

pub use details::{CredentialDetails, CredentialSummary};
pub use name::CredentialName;
pub use parameters::{
    CertificateParameters, ExtendedKeyUsage, GenerationParameters, KeyLength, KeyUsage,
    PasswordParameters, RsaParameters, SshParameters,
};
pub use request::{CredentialRequest, ParametersRequest};
pub use secret::SecretString;
pub use types::{CredentialType, WriteMode};
pub use value::{
    CertificateCredential, CredentialValue, JsonCredential, PasswordCredential, RsaCredential,
    SshCredential, UserCredential, ValueCredential,
};
