/// Identity extracted from a verified auth token. The empty claim is the
/// anonymous caller, which is valid for reads but not for mutations.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct IdentityClaim {
    pub uid: Option<String>,
    pub email: Option<String>,
}

impl IdentityClaim {
    pub fn anonymous() -> IdentityClaim {
        IdentityClaim::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.uid.is_none() && self.email.is_none()
    }

    /// Contact string comments get attributed to: the verified email when
    /// the token exposes one, the uid otherwise.
    pub fn posted_by(&self) -> Option<&str> {
        self.email.as_deref().or(self.uid.as_deref())
    }
}
