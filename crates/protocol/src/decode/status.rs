use super::{RecordBuilder, record_decoder};
use crate::records::{CcStatus, HostInfo};
use crate::xml::{assign, parse_bool};

#[derive(Default)]
pub(crate) struct CcStatusBuilder(CcStatus);

impl RecordBuilder for CcStatusBuilder {
    type Record = CcStatus;
    const TAG: &'static str = "cc_status";

    fn field(&mut self, name: &str, text: &str) {
        let status = &mut self.0;
        match name {
            "network_status" => assign(&mut status.network_status, name, text),
            "ams_password_error" => status.ams_password_error = parse_bool(text),
            "manager_must_quit" => status.manager_must_quit = parse_bool(text),
            "task_suspend_reason" => assign(&mut status.task_suspend_reason, name, text),
            "task_mode" => assign(&mut status.task_mode, name, text),
            "task_mode_perm" => assign(&mut status.task_mode_perm, name, text),
            "task_mode_delay" => assign(&mut status.task_mode_delay, name, text),
            "gpu_suspend_reason" => assign(&mut status.gpu_suspend_reason, name, text),
            "gpu_mode" => assign(&mut status.gpu_mode, name, text),
            "gpu_mode_perm" => assign(&mut status.gpu_mode_perm, name, text),
            "gpu_mode_delay" => assign(&mut status.gpu_mode_delay, name, text),
            "network_suspend_reason" => assign(&mut status.network_suspend_reason, name, text),
            "network_mode" => assign(&mut status.network_mode, name, text),
            "network_mode_perm" => assign(&mut status.network_mode_perm, name, text),
            "network_mode_delay" => assign(&mut status.network_mode_delay, name, text),
            "disallow_attach" => status.disallow_attach = parse_bool(text),
            "simple_gui_only" => status.simple_gui_only = parse_bool(text),
            "max_event_log_lines" => assign(&mut status.max_event_log_lines, name, text),
            _ => {}
        }
    }

    fn build(self) -> Option<CcStatus> {
        Some(self.0)
    }
}

#[derive(Default)]
pub(crate) struct HostInfoBuilder(HostInfo);

impl HostInfoBuilder {
    pub(crate) fn into_inner(self) -> HostInfo {
        self.0
    }
}

impl RecordBuilder for HostInfoBuilder {
    type Record = HostInfo;
    const TAG: &'static str = "host_info";

    fn field(&mut self, name: &str, text: &str) {
        let host = &mut self.0;
        match name {
            "timezone" => assign(&mut host.timezone, name, text),
            "domain_name" => host.domain_name = text.to_owned(),
            "ip_addr" => host.ip_addr = text.to_owned(),
            "host_cpid" => host.host_cpid = text.to_owned(),
            "p_ncpus" => assign(&mut host.p_ncpus, name, text),
            "p_vendor" => host.p_vendor = text.to_owned(),
            "p_model" => host.p_model = text.to_owned(),
            "p_features" => host.p_features = text.to_owned(),
            "p_fpops" => assign(&mut host.p_fpops, name, text),
            "p_iops" => assign(&mut host.p_iops, name, text),
            "p_membw" => assign(&mut host.p_membw, name, text),
            "p_calculated" => assign(&mut host.p_calculated, name, text),
            "m_nbytes" => assign(&mut host.m_nbytes, name, text),
            "m_cache" => assign(&mut host.m_cache, name, text),
            "m_swap" => assign(&mut host.m_swap, name, text),
            "d_total" => assign(&mut host.d_total, name, text),
            "d_free" => assign(&mut host.d_free, name, text),
            "os_name" => host.os_name = text.to_owned(),
            "os_version" => host.os_version = text.to_owned(),
            "virtualbox_version" => host.virtualbox_version = text.to_owned(),
            _ => {}
        }
    }

    fn build(self) -> Option<HostInfo> {
        Some(self.0)
    }
}

record_decoder! {
    /// Decodes the reply to `get_cc_status`.
    CcStatusDecoder: single CcStatusBuilder => CcStatus
}

record_decoder! {
    /// Decodes the reply to `get_host_info`.
    HostInfoDecoder: single HostInfoBuilder => HostInfo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_reply;

    #[test]
    fn decodes_cc_status() {
        let reply = "<boinc_gui_rpc_reply>\n<cc_status>\n\
            <network_status>2</network_status>\n\
            <ams_password_error>0</ams_password_error>\n\
            <task_suspend_reason>4</task_suspend_reason>\n\
            <task_mode>3</task_mode>\n<task_mode_perm>2</task_mode_perm>\n\
            <task_mode_delay>120.500000</task_mode_delay>\n\
            <network_mode>1</network_mode>\n\
            <disallow_attach/>\n\
            <max_event_log_lines>2000</max_event_log_lines>\n\
            </cc_status>\n</boinc_gui_rpc_reply>\n";
        let status = decode_reply(reply, CcStatusDecoder::new())
            .expect("decode")
            .expect("status present");

        assert_eq!(status.network_status, 2);
        assert!(!status.ams_password_error);
        assert!(!status.manager_must_quit);
        assert_eq!(status.task_suspend_reason, 4);
        assert_eq!(status.task_mode(), Some(crate::records::Mode::Never));
        assert_eq!(status.task_mode_perm, 2);
        assert!((status.task_mode_delay - 120.5).abs() < f64::EPSILON);
        assert_eq!(status.network_mode(), Some(crate::records::Mode::Always));
        assert!(status.disallow_attach);
        assert_eq!(status.max_event_log_lines, 2000);
    }

    #[test]
    fn missing_status_block_yields_none() {
        let reply = "<boinc_gui_rpc_reply><error>unauthorized</error></boinc_gui_rpc_reply>";
        assert_eq!(decode_reply(reply, CcStatusDecoder::new()), Ok(None));
    }

    #[test]
    fn decodes_host_info_and_skips_bad_numbers() {
        let reply = "<boinc_gui_rpc_reply><host_info>\
            <timezone>3600</timezone><domain_name>crunch</domain_name>\
            <p_ncpus>eight</p_ncpus><p_vendor>GenuineIntel</p_vendor>\
            <p_fpops>3.2e9</p_fpops><m_nbytes>17179869184.000000</m_nbytes>\
            <os_name>Linux</os_name><os_version>6.1</os_version>\
            <coprocs><coproc_cuda><name>GeForce</name></coproc_cuda></coprocs>\
            </host_info></boinc_gui_rpc_reply>";
        let host = decode_reply(reply, HostInfoDecoder::new())
            .expect("decode")
            .expect("host present");

        assert_eq!(host.timezone, 3600);
        assert_eq!(host.domain_name, "crunch");
        assert_eq!(host.p_ncpus, 0);
        assert_eq!(host.p_vendor, "GenuineIntel");
        assert!((host.p_fpops - 3.2e9).abs() < 1.0);
        assert!((host.m_nbytes - 17_179_869_184.0).abs() < 1.0);
        assert_eq!(host.os_name, "Linux");
    }
}
