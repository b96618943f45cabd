use bytes::{Buf, BufMut, Bytes, BytesMut};
use tapguard_domain::DomainError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const CONTENT_TYPE: &[u8] = b"protobuf:dnstap.Dnstap";

pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

pub const MAX_CONTROL_SIZE: usize = 512;

const FIELD_CONTENT_TYPE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    Accept,
    Start,
    Stop,
    Ready,
    Finish,
}

impl ControlType {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(ControlType::Accept),
            2 => Some(ControlType::Start),
            3 => Some(ControlType::Stop),
            4 => Some(ControlType::Ready),
            5 => Some(ControlType::Finish),
            _ => None,
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            ControlType::Accept => 1,
            ControlType::Start => 2,
            ControlType::Stop => 3,
            ControlType::Ready => 4,
            ControlType::Finish => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFrame {
    pub kind: ControlType,
    pub content_types: Vec<Bytes>,
}

impl ControlFrame {
    pub fn new(kind: ControlType) -> Self {
        Self {
            kind,
            content_types: Vec::new(),
        }
    }

    /// Control frame advertising the dnstap content type.
    pub fn dnstap(kind: ControlType) -> Self {
        Self {
            kind,
            content_types: vec![Bytes::from_static(CONTENT_TYPE)],
        }
    }

    /// No content type at all counts as a match.
    pub fn accepts_dnstap(&self) -> bool {
        self.content_types.is_empty() || self.content_types.iter().any(|c| c == CONTENT_TYPE)
    }

    fn decode(mut payload: Bytes) -> Result<Self, DomainError> {
        if payload.remaining() < 4 {
            return Err(DomainError::Framing("control frame too short".to_string()));
        }
        let raw = payload.get_u32();
        let kind = ControlType::from_u32(raw)
            .ok_or_else(|| DomainError::Framing(format!("unknown control type {}", raw)))?;

        let mut content_types = Vec::new();
        while payload.has_remaining() {
            if payload.remaining() < 8 {
                return Err(DomainError::Framing("truncated control field".to_string()));
            }
            let field = payload.get_u32();
            let len = payload.get_u32() as usize;
            if payload.remaining() < len {
                return Err(DomainError::Framing("truncated control field".to_string()));
            }
            let value = payload.split_to(len);
            if field == FIELD_CONTENT_TYPE {
                content_types.push(value);
            }
        }

        Ok(Self {
            kind,
            content_types,
        })
    }

    /// Wire form including the escape and length prefix.
    pub fn encode(&self) -> Bytes {
        let body_len: usize = 4 + self
            .content_types
            .iter()
            .map(|c| 8 + c.len())
            .sum::<usize>();
        let mut buf = BytesMut::with_capacity(8 + body_len);
        buf.put_u32(0);
        buf.put_u32(body_len as u32);
        buf.put_u32(self.kind.to_u32());
        for content_type in &self.content_types {
            buf.put_u32(FIELD_CONTENT_TYPE);
            buf.put_u32(content_type.len() as u32);
            buf.put_slice(content_type);
        }
        buf.freeze()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Data(Bytes),
    Control(ControlFrame),
}

/// Read one frame. `Ok(None)` on end of stream at a frame boundary.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Frame>, DomainError>
where
    R: AsyncRead + Unpin,
{
    let len = match reader.read_u32().await {
        Ok(len) => len as usize,
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if len == 0 {
        let control_len = reader.read_u32().await? as usize;
        if control_len > MAX_CONTROL_SIZE {
            return Err(DomainError::Framing(format!(
                "control frame of {} bytes exceeds {}",
                control_len, MAX_CONTROL_SIZE
            )));
        }
        let payload = read_payload(reader, control_len).await?;
        return ControlFrame::decode(payload).map(|c| Some(Frame::Control(c)));
    }

    if len > MAX_FRAME_SIZE {
        return Err(DomainError::Framing(format!(
            "data frame of {} bytes exceeds {}",
            len, MAX_FRAME_SIZE
        )));
    }
    read_payload(reader, len).await.map(|b| Some(Frame::Data(b)))
}

async fn read_payload<R>(reader: &mut R, len: usize) -> Result<Bytes, DomainError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(Bytes::from(buf))
}

pub async fn write_control<W>(writer: &mut W, frame: &ControlFrame) -> Result<(), DomainError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&frame.encode()).await?;
    writer.flush().await?;
    Ok(())
}

/// Read the next frame and require it to be a control frame of `kind`.
pub(crate) async fn expect_control<R>(
    reader: &mut R,
    kind: ControlType,
) -> Result<ControlFrame, DomainError>
where
    R: AsyncRead + Unpin,
{
    match read_frame(reader).await? {
        Some(Frame::Control(control)) if control.kind == kind => {
            if !control.accepts_dnstap() {
                return Err(DomainError::Framing(
                    "peer does not offer protobuf:dnstap.Dnstap".to_string(),
                ));
            }
            Ok(control)
        }
        Some(Frame::Control(control)) => Err(DomainError::Framing(format!(
            "expected {:?} control frame, got {:?}",
            kind, control.kind
        ))),
        Some(Frame::Data(_)) => Err(DomainError::Framing(format!(
            "expected {:?} control frame, got data",
            kind
        ))),
        None => Err(DomainError::Framing(format!(
            "stream ended before {:?} control frame",
            kind
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn control_frame_round_trips() {
        let frame = ControlFrame::dnstap(ControlType::Ready);
        let encoded = frame.encode();
        let mut reader = &encoded[..];
        assert_eq!(
            read_frame(&mut reader).await.unwrap(),
            Some(Frame::Control(frame))
        );
        assert_eq!(read_frame(&mut reader).await.unwrap(), None);
    }

    #[tokio::test]
    async fn oversized_data_frame_is_rejected() {
        let header = ((MAX_FRAME_SIZE + 1) as u32).to_be_bytes();
        let mut reader = &header[..];
        assert!(matches!(
            read_frame(&mut reader).await,
            Err(DomainError::Framing(_))
        ));
    }

    #[tokio::test]
    async fn truncated_data_frame_is_io_error() {
        let bytes = [0, 0, 0, 8, 1, 2, 3];
        let mut reader = &bytes[..];
        assert!(matches!(
            read_frame(&mut reader).await,
            Err(DomainError::IoError(_))
        ));
    }

    #[test]
    fn foreign_content_type_is_not_accepted() {
        let frame = ControlFrame {
            kind: ControlType::Ready,
            content_types: vec![Bytes::from_static(b"protobuf:other")],
        };
        assert!(!frame.accepts_dnstap());
        assert!(ControlFrame::new(ControlType::Start).accepts_dnstap());
    }
}
