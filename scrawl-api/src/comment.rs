use crate::Error;

/// Request body for posting a comment. An absent `text` field and an empty
/// one fail validation the same way.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    #[serde(default)]
    pub text: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        if self.text.is_empty() {
            return Err(Error::MissingCommentText);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(
            NewComment {
                text: String::new()
            }
            .validate(),
            Err(Error::MissingCommentText)
        );
    }

    #[test]
    fn absent_text_field_deserializes_empty() {
        let c: NewComment = serde_json::from_str("{}").expect("parsing empty object");
        assert_eq!(c.validate(), Err(Error::MissingCommentText));
    }

    #[test]
    fn nonempty_text_is_accepted() {
        assert_eq!(
            NewComment {
                text: String::from("nice")
            }
            .validate(),
            Ok(())
        );
    }
}
