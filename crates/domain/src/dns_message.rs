use super::RecordType;
use std::fmt;

/// DNS response code, kept numeric so extended codes survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseCode(pub u16);

impl ResponseCode {
    pub const NO_ERROR: ResponseCode = ResponseCode(0);
    pub const NX_DOMAIN: ResponseCode = ResponseCode(3);

    pub fn is_no_error(&self) -> bool {
        self.0 == 0
    }

    pub fn mnemonic(&self) -> &'static str {
        match self.0 {
            0 => "NOERROR",
            1 => "FORMERR",
            2 => "SERVFAIL",
            3 => "NXDOMAIN",
            4 => "NOTIMP",
            5 => "REFUSED",
            6 => "YXDOMAIN",
            7 => "YXRRSET",
            8 => "NXRRSET",
            9 => "NOTAUTH",
            10 => "NOTZONE",
            16 => "BADSIG",
            17 => "BADKEY",
            18 => "BADTIME",
            19 => "BADMODE",
            20 => "BADNAME",
            21 => "BADALG",
            22 => "BADTRUNC",
            23 => "BADCOOKIE",
            _ => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    /// Lower-cased, fully-qualified name (trailing dot).
    pub name: String,
    pub record_type: RecordType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub name: String,
    pub record_type: RecordType,
    /// Target of a CNAME record; `None` for every other type.
    pub cname_target: Option<String>,
}

impl DnsAnswer {
    pub fn cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::CNAME,
            cname_target: Some(target.into()),
        }
    }

    pub fn other(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            cname_target: None,
        }
    }
}

/// The parts of an unpacked DNS message the consumers care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,
    pub response_code: ResponseCode,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<DnsAnswer>,
}

impl DnsMessage {
    pub fn first_question(&self) -> Option<&DnsQuestion> {
        self.questions.first()
    }

    /// A/AAAA question answered NOERROR with an empty answer section.
    pub fn is_nodata(&self) -> bool {
        self.first_question()
            .is_some_and(|q| q.record_type.is_address())
            && self.response_code.is_no_error()
            && self.answers.is_empty()
    }
}
