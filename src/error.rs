pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

#[cfg(feature = "no-wasm")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::ReqwestError(e))
    }
}

#[cfg(feature = "wasm")]
impl From<gloo_net::Error> for Error {
    fn from(e: gloo_net::Error) -> Error {
        Error::new(ErrorKind::GlooNetError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJsonError(e))
    }
}

pub enum ErrorKind {
    #[cfg(feature = "no-wasm")]
    ReqwestError(reqwest::Error),
    #[cfg(feature = "wasm")]
    GlooNetError(gloo_net::Error),
    SerdeJsonError(serde_json::Error),
    ParseError(String),
}

impl std::fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "no-wasm")]
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e:?}"),
            #[cfg(feature = "wasm")]
            ErrorKind::GlooNetError(ref e) => write!(f, "GlooNetError: {e:?}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e:?}"),
            ErrorKind::ParseError(ref e) => write!(f, "ParseError: {e:?}"),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "no-wasm")]
            ErrorKind::ReqwestError(ref e) => write!(f, "request error: {e}"),
            #[cfg(feature = "wasm")]
            ErrorKind::GlooNetError(ref e) => write!(f, "request error: {e}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "json error: {e}"),
            ErrorKind::ParseError(ref e) => write!(f, "parse error: {e}"),
        }
    }
}
