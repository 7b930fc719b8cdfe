use super::{RecordBuilder, record_decoder};
use crate::records::{ActiveTask, ActiveTaskState, ResultState, TaskResult};
use crate::xml::{assign, parse_bool};

#[derive(Default)]
pub(crate) struct ResultBuilder {
    result: TaskResult,
    in_active_task: bool,
}

impl ResultBuilder {
    fn active_field(active: &mut ActiveTask, name: &str, text: &str) {
        match name {
            "active_task_state" => {
                let mut code = active.active_task_state.code();
                assign(&mut code, name, text);
                active.active_task_state = ActiveTaskState::from(code);
            }
            "app_version_num" => assign(&mut active.app_version_num, name, text),
            "slot" => assign(&mut active.slot, name, text),
            "pid" => assign(&mut active.pid, name, text),
            "scheduler_state" => assign(&mut active.scheduler_state, name, text),
            "checkpoint_cpu_time" => assign(&mut active.checkpoint_cpu_time, name, text),
            "current_cpu_time" => assign(&mut active.current_cpu_time, name, text),
            "fraction_done" => assign(&mut active.fraction_done, name, text),
            "elapsed_time" => assign(&mut active.elapsed_time, name, text),
            "swap_size" => assign(&mut active.swap_size, name, text),
            "working_set_size_smoothed" => {
                assign(&mut active.working_set_size_smoothed, name, text);
            }
            "too_large" => active.too_large = parse_bool(text),
            "needs_shmem" => active.needs_shmem = parse_bool(text),
            "edf_scheduled" => active.edf_scheduled = parse_bool(text),
            "graphics_exec_path" => active.graphics_exec_path = text.to_owned(),
            "slot_path" => active.slot_path = text.to_owned(),
            _ => {}
        }
    }
}

impl RecordBuilder for ResultBuilder {
    type Record = TaskResult;
    const TAG: &'static str = "result";

    fn start(&mut self, name: &str) {
        if name == "active_task" {
            self.in_active_task = true;
            self.result.active.get_or_insert_with(ActiveTask::default);
        }
    }

    fn field(&mut self, name: &str, text: &str) {
        if self.in_active_task {
            if name == "active_task" {
                self.in_active_task = false;
            } else if let Some(active) = &mut self.result.active {
                Self::active_field(active, name, text);
            }
            return;
        }

        let result = &mut self.result;
        match name {
            "name" => result.name = text.to_owned(),
            "wu_name" => result.wu_name = text.to_owned(),
            "project_url" => result.project_url = text.to_owned(),
            "version_num" => assign(&mut result.version_num, name, text),
            "plan_class" => result.plan_class = text.to_owned(),
            "ready_to_report" => result.ready_to_report = parse_bool(text),
            "got_server_ack" => result.got_server_ack = parse_bool(text),
            "final_cpu_time" => assign(&mut result.final_cpu_time, name, text),
            "final_elapsed_time" => assign(&mut result.final_elapsed_time, name, text),
            "state" => {
                let mut code = result.state.code();
                assign(&mut code, name, text);
                result.state = ResultState::from(code);
            }
            "exit_status" => assign(&mut result.exit_status, name, text),
            "signal" => assign(&mut result.signal, name, text),
            "stderr_out" => result.stderr_out = text.to_owned(),
            "suspended_via_gui" => result.suspended_via_gui = parse_bool(text),
            "project_suspended_via_gui" => result.project_suspended_via_gui = parse_bool(text),
            "coproc_missing" => result.coproc_missing = parse_bool(text),
            "gpu_mem_wait" => result.gpu_mem_wait = parse_bool(text),
            "report_deadline" => assign(&mut result.report_deadline, name, text),
            "received_time" => assign(&mut result.received_time, name, text),
            "estimated_cpu_time_remaining" => {
                assign(&mut result.estimated_cpu_time_remaining, name, text);
            }
            "completed_time" => assign(&mut result.completed_time, name, text),
            "resources" => result.resources = text.to_owned(),
            _ => {}
        }
    }

    fn build(self) -> Option<TaskResult> {
        (!self.result.name.is_empty()).then_some(self.result)
    }
}

record_decoder! {
    /// Decodes the reply to `get_results`.
    ResultsDecoder: list of ResultBuilder => TaskResult
}
