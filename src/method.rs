use std::fmt;

/// The two request methods this client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// Map a free-form method name to a [`Method`].
    ///
    /// Only the exact string `"POST"` selects [`Method::Post`]. Anything else,
    /// including `"post"` and `"PUT"`, falls back to [`Method::Get`].
    pub fn from_command(command: &str) -> Method {
        if command == "POST" {
            Method::Post
        } else {
            Method::Get
        }
    }

    pub(crate) fn has_request_body(&self) -> bool {
        *self == Method::Post
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_exact_post_is_post() {
        assert_eq!(Method::from_command("POST"), Method::Post);
        assert_eq!(Method::from_command("GET"), Method::Get);
        assert_eq!(Method::from_command("post"), Method::Get);
        assert_eq!(Method::from_command("PUT"), Method::Get);
        assert_eq!(Method::from_command(""), Method::Get);
    }

    #[test]
    fn display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
