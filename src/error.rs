use std::fmt;

/// Why an input buffer could not be read as a DOCX package.
#[derive(Debug)]
pub enum MalformedInput {
    Zip(zip::result::ZipError),
    Xml(roxmltree::Error),
    MissingPart(&'static str),
    MissingBody,
    Read(std::io::Error),
}

#[derive(Debug)]
pub enum Error {
    MalformedInput(MalformedInput),
    Render(String),
    Io(std::io::Error),
}

impl Error {
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::MalformedInput(_))
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Error::Render(_))
    }
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInput::Zip(e) => write!(f, "ZIP error: {e}"),
            MalformedInput::Xml(e) => write!(f, "XML error: {e}"),
            MalformedInput::MissingPart(part) => write!(f, "missing package part {part}"),
            MalformedInput::MissingBody => write!(f, "missing w:body"),
            MalformedInput::Read(e) => write!(f, "unreadable package part: {e}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput(reason) => write!(f, "not a valid DOCX file: {reason}"),
            Error::Render(e) => write!(f, "PDF error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for MalformedInput {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MalformedInput::Zip(e) => Some(e),
            MalformedInput::Xml(e) => Some(e),
            MalformedInput::Read(e) => Some(e),
            MalformedInput::MissingPart(_) | MalformedInput::MissingBody => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedInput(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Render(_) => None,
        }
    }
}

impl From<MalformedInput> for Error {
    fn from(e: MalformedInput) -> Self {
        Error::MalformedInput(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::MalformedInput(MalformedInput::Zip(e))
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::MalformedInput(MalformedInput::Xml(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
