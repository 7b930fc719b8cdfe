use super::{RecordBuilder, record_decoder};
use crate::records::Transfer;
use crate::xml::{assign, parse_bool};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Block {
    #[default]
    Top,
    Persistent,
    Live,
}

#[derive(Default)]
pub(crate) struct TransferBuilder {
    transfer: Transfer,
    block: Block,
    live_bytes_seen: bool,
}

impl TransferBuilder {
    fn persistent_field(&mut self, name: &str, text: &str) {
        let transfer = &mut self.transfer;
        match name {
            "num_retries" => assign(&mut transfer.num_retries, name, text),
            "first_request_time" => assign(&mut transfer.first_request_time, name, text),
            "next_request_time" => assign(&mut transfer.next_request_time, name, text),
            "time_so_far" => assign(&mut transfer.time_so_far, name, text),
            "last_bytes_xferred" => {
                if !self.live_bytes_seen {
                    assign(&mut transfer.bytes_xferred, name, text);
                }
            }
            "is_upload" => transfer.is_upload = parse_bool(text),
            _ => {}
        }
    }

    fn live_field(&mut self, name: &str, text: &str) {
        let transfer = &mut self.transfer;
        match name {
            "bytes_xferred" => {
                assign(&mut transfer.bytes_xferred, name, text);
                self.live_bytes_seen = true;
            }
            "file_offset" => assign(&mut transfer.file_offset, name, text),
            "xfer_speed" => assign(&mut transfer.xfer_speed, name, text),
            "url" => transfer.hostname = host_of(text).to_owned(),
            _ => {}
        }
    }
}

impl RecordBuilder for TransferBuilder {
    type Record = Transfer;
    const TAG: &'static str = "file_transfer";

    fn start(&mut self, name: &str) {
        match name {
            "persistent_file_xfer" => {
                self.block = Block::Persistent;
                self.transfer.pers_xfer_active = true;
            }
            "file_xfer" => {
                self.block = Block::Live;
                self.transfer.xfer_active = true;
            }
            _ => {}
        }
    }

    fn field(&mut self, name: &str, text: &str) {
        if matches!(name, "persistent_file_xfer" | "file_xfer") {
            self.block = Block::Top;
            return;
        }

        match self.block {
            Block::Persistent => self.persistent_field(name, text),
            Block::Live => self.live_field(name, text),
            Block::Top => {
                let transfer = &mut self.transfer;
                match name {
                    "name" => transfer.name = text.to_owned(),
                    "project_url" => transfer.project_url = text.to_owned(),
                    "generated_locally" => transfer.generated_locally = parse_bool(text),
                    "nbytes" => assign(&mut transfer.nbytes, name, text),
                    "max_nbytes" => assign(&mut transfer.max_nbytes, name, text),
                    "status" => assign(&mut transfer.status, name, text),
                    "is_upload" => transfer.is_upload = parse_bool(text),
                    "project_backoff" => assign(&mut transfer.project_backoff, name, text),
                    _ => {}
                }
            }
        }
    }

    fn build(self) -> Option<Transfer> {
        (!self.transfer.name.is_empty()).then_some(self.transfer)
    }
}

fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    authority.rsplit('@').next().unwrap_or(authority)
}

record_decoder! {
    /// Decodes the reply to `get_file_transfers`.
    TransfersDecoder: list of TransferBuilder => Transfer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_reply;

    fn decode(body: &str) -> Vec<Transfer> {
        let reply = format!("<boinc_gui_rpc_reply><file_transfers>{body}</file_transfers></boinc_gui_rpc_reply>");
        decode_reply(&reply, TransfersDecoder::new()).expect("decode")
    }

    #[test]
    fn live_bytes_override_persisted_bytes() {
        let transfers = decode(
            "<file_transfer><name>f</name>\
             <persistent_file_xfer><last_bytes_xferred>100</last_bytes_xferred></persistent_file_xfer>\
             <file_xfer><bytes_xferred>250</bytes_xferred></file_xfer>\
             </file_transfer>",
        );
        assert!((transfers[0].bytes_xferred - 250.0).abs() < f64::EPSILON);
        assert!(transfers[0].pers_xfer_active);
        assert!(transfers[0].xfer_active);
    }

    #[test]
    fn persisted_bytes_never_override_live_bytes() {
        let transfers = decode(
            "<file_transfer><name>f</name>\
             <file_xfer><bytes_xferred>250</bytes_xferred></file_xfer>\
             <persistent_file_xfer><last_bytes_xferred>100</last_bytes_xferred></persistent_file_xfer>\
             </file_transfer>",
        );
        assert!((transfers[0].bytes_xferred - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn persisted_bytes_used_without_live_block() {
        let transfers = decode(
            "<file_transfer><name>f</name>\
             <persistent_file_xfer><last_bytes_xferred>100</last_bytes_xferred></persistent_file_xfer>\
             </file_transfer>",
        );
        assert!((transfers[0].bytes_xferred - 100.0).abs() < f64::EPSILON);
        assert!(!transfers[0].xfer_active);
    }

    #[test]
    fn decodes_transfer_fields() {
        let transfers = decode(
            "<file_transfer>\
               <project_url>http://x/</project_url><name>out.zip</name>\
               <nbytes>2048.000000</nbytes><status>0</status>\
               <persistent_file_xfer><num_retries>2</num_retries><is_upload>1</is_upload>\
                 <next_request_time>1700000100.0</next_request_time></persistent_file_xfer>\
               <file_xfer><xfer_speed>512.0</xfer_speed><url>https://upload.x.org:443/cgi?f=1</url></file_xfer>\
               <project_backoff>30.0</project_backoff>\
             </file_transfer>\
             <file_transfer><nbytes>1</nbytes></file_transfer>",
        );
        assert_eq!(transfers.len(), 1);
        let transfer = &transfers[0];
        assert!(transfer.matches("http://X/", "out.zip"));
        assert_eq!(transfer.num_retries, 2);
        assert!(transfer.is_upload);
        assert_eq!(transfer.hostname, "upload.x.org:443");
        assert!((transfer.project_backoff - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn host_of_strips_scheme_path_and_credentials() {
        assert_eq!(host_of("http://user@example.org/path"), "example.org");
        assert_eq!(host_of("example.org"), "example.org");
    }
}
