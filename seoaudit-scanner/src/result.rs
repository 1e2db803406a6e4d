/// Outcome of a single GET. `status == 0` means the request never produced a
/// usable response (DNS, connect, TLS, timeout or body decode failure).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    pub fn failed() -> Self {
        Self {
            status: 0,
            body: String::new(),
        }
    }

    /// A sitemap is only read from a 200 with something in it.
    pub fn is_ok(&self) -> bool {
        self.status == 200 && !self.body.is_empty()
    }

    /// Pages in this state are not parsed; they get the all-missing record.
    pub fn is_error_page(&self) -> bool {
        self.status >= 400 || self.body.is_empty()
    }
}
