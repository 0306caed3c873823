use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        json_error(err)
    }
}

pub fn io_error(err: io::Error) -> Error {
    Error {
        code: 2,
        message: format!("io error: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error(detail: impl fmt::Display) -> Error {
    Error {
        code: 4,
        message: format!("upstream error: {}", detail),
    }
}

pub fn unexpected_error(detail: impl fmt::Display) -> Error {
    Error {
        code: 5,
        message: format!("unexpected error: {}", detail),
    }
}

pub fn json_error(err: serde_json::Error) -> Error {
    Error {
        code: 6,
        message: format!("json error: {}", err),
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 100,
        message: "invalid state".into(),
    }
}

pub fn json_file_error(path: &Path, err: serde_json::Error) -> Error {
    Error {
        code: 6,
        message: format!("json error in {}: {}", path.display(), err),
    }
}

pub fn invalid_input_error(detail: impl fmt::Display) -> Error {
    Error {
        code: 101,
        message: format!("invalid input: {}", detail),
    }
}

pub fn not_found_error(detail: impl fmt::Display) -> Error {
    Error {
        code: 102,
        message: format!("not found: {}", detail),
    }
}

pub fn invalid_dataset_error(path: &Path, detail: impl fmt::Display) -> Error {
    Error {
        code: 103,
        message: format!("invalid dataset {}: {}", path.display(), detail),
    }
}

pub fn duplicate_route_error(route_id: &str) -> Error {
    Error {
        code: 104,
        message: format!("duplicate route id: {}", route_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = invalid_dataset_error(Path::new("data/raw/x.json"), "record 3: bad");

        assert_eq!(err.code, 103);
        assert_eq!(err.to_string(), "invalid dataset data/raw/x.json: record 3: bad (code 103)");
        assert_eq!(duplicate_route_error("r1").code, 104);
    }

    #[test]
    fn io_conversion_keeps_context() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();

        assert_eq!(err.code, 2);
        assert!(err.to_string().contains("missing"));
    }
}
