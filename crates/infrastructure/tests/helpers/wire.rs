use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};
use hickory_proto::xfer::Protocol;
use hickory_server::authority::{MessageRequest, MessageResponse};
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Captures every response sent through it, in order.
#[derive(Clone, Default)]
pub struct CapturingResponseHandler {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl CapturingResponseHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|buf| Message::from_vec(buf).expect("failed to parse captured DNS response"))
            .collect()
    }

    pub fn single(&self) -> Message {
        let mut messages = self.messages();
        assert_eq!(messages.len(), 1, "expected exactly one response");
        messages.remove(0)
    }
}

#[async_trait]
impl ResponseHandler for CapturingResponseHandler {
    async fn send_response<'a>(
        &mut self,
        response: MessageResponse<
            '_,
            'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
        >,
    ) -> io::Result<ResponseInfo> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        encoder.set_max_size(u16::MAX);
        let info = response
            .destructive_emit(&mut encoder)
            .map_err(io::Error::other)?;
        self.sent.lock().unwrap().push(buf);
        Ok(info)
    }
}

pub fn client_addr() -> SocketAddr {
    "192.0.2.10:53000".parse().unwrap()
}

fn query_message(name: &str, record_type: RecordType) -> Message {
    let mut msg = Message::new();
    msg.set_id(4242);
    msg.set_message_type(MessageType::Query);
    msg.set_op_code(OpCode::Query);
    let mut query = Query::new();
    query.set_name(Name::from_ascii(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);
    msg.add_query(query);
    msg
}

fn into_request(msg: Message, protocol: Protocol) -> Request {
    let bytes = msg.to_vec().unwrap();
    let mut decoder = BinDecoder::new(&bytes);
    let request = MessageRequest::read(&mut decoder).expect("failed to parse MessageRequest");
    Request::new(request, client_addr(), protocol)
}

pub fn build_request(name: &str, record_type: RecordType, protocol: Protocol) -> Request {
    into_request(query_message(name, record_type), protocol)
}

/// IXFR request carrying the client's current SOA serial.
pub fn build_ixfr_request(zone: &str, serial: u32) -> Request {
    let mut msg = query_message(zone, RecordType::IXFR);
    let zone_name = Name::from_ascii(zone).unwrap();
    let soa = SOA::new(
        zone_name.clone(),
        zone_name.clone(),
        serial,
        0,
        0,
        0,
        0,
    );
    msg.add_name_server(Record::from_rdata(zone_name, 0, RData::SOA(soa)));
    into_request(msg, Protocol::Tcp)
}

pub async fn send<H: RequestHandler>(handler: &H, request: &Request) -> CapturingResponseHandler {
    let capture = CapturingResponseHandler::new();
    handler.handle_request(request, capture.clone()).await;
    capture
}
