use crate::model::SslCert;
use crate::resource::CaCertBlock;

impl From<&SslCert> for CaCertBlock {
    fn from(cert: &SslCert) -> Self {
        Self {
            cert: cert.cert.clone(),
            common_name: cert.common_name.clone(),
            create_time: cert.create_time.clone(),
            expiration_time: cert.expiration_time.clone(),
            sha1_fingerprint: cert.sha1_fingerprint.clone(),
        }
    }
}
