use flux_derive::request;

#[request("ui/dismiss-notice")]
pub struct DismissNoticeReq {
    pub id: u64,
}
