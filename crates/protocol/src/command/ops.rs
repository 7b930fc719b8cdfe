use std::fmt;
use std::str::FromStr;

use super::Body;

/// Error returned when an operation name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown {kind} operation '{name}'")]
pub struct ParseOpError {
    kind: &'static str,
    name: String,
}

impl ParseOpError {
    fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_owned(),
        }
    }
}

macro_rules! op_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $tag:literal, $cli:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[doc = concat!("Sends `<", $tag, ">`.")]
                $variant,
            )+
        }

        impl $name {
            /// Every operation, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Request tag sent for this operation.
            #[must_use]
            pub const fn tag(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }

            /// Short name accepted by [`FromStr`].
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $cli,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ParseOpError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|op| op.name() == wanted || op.tag() == wanted)
                    .ok_or_else(|| ParseOpError::new($kind, s))
            }
        }
    };
}

op_enum! {
    /// Operations on an attached project.
    ProjectOp ("project") {
        Reset => "project_reset", "reset";
        Detach => "project_detach", "detach";
        Update => "project_update", "update";
        Suspend => "project_suspend", "suspend";
        Resume => "project_resume", "resume";
        /// Stop fetching new work.
        NoMoreWork => "project_nomorework", "nomorework";
        AllowMoreWork => "project_allowmorework", "allowmorework";
        DetachWhenDone => "project_detach_when_done", "detach_when_done";
        DontDetachWhenDone => "project_dont_detach_when_done", "dont_detach_when_done";
    }
}

op_enum! {
    /// Operations on a single task.
    ResultOp ("task") {
        Abort => "abort_result", "abort";
        Suspend => "suspend_result", "suspend";
        Resume => "resume_result", "resume";
    }
}

op_enum! {
    /// Operations on a pending file transfer.
    TransferOp ("file transfer") {
        Retry => "retry_file_transfer", "retry";
        Abort => "abort_file_transfer", "abort";
    }
}

/// Applies `op` to the project at `project_url`.
#[must_use]
pub fn project_op(op: ProjectOp, project_url: &str) -> String {
    Body::new(op.tag()).text("project_url", project_url).finish()
}

/// Applies `op` to the task `name` of the project at `project_url`.
#[must_use]
pub fn result_op(op: ResultOp, project_url: &str, name: &str) -> String {
    Body::new(op.tag())
        .text("project_url", project_url)
        .text("name", name)
        .finish()
}

/// Applies `op` to the transfer of `filename` for the project at `project_url`.
#[must_use]
pub fn transfer_op(op: TransferOp, project_url: &str, filename: &str) -> String {
    Body::new(op.tag())
        .text("project_url", project_url)
        .text("filename", filename)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_op_uses_operation_tag() {
        assert_eq!(
            project_op(ProjectOp::NoMoreWork, "http://x/"),
            "<project_nomorework>\n<project_url>http://x/</project_url>\n</project_nomorework>"
        );
    }

    #[test]
    fn result_op_escapes_values() {
        assert_eq!(
            result_op(ResultOp::Abort, "http://x/?a=1&b=2", "wu<1>"),
            "<abort_result>\n<project_url>http://x/?a=1&amp;b=2</project_url>\n<name>wu&lt;1&gt;</name>\n</abort_result>"
        );
    }

    #[test]
    fn transfer_op_names_file() {
        assert_eq!(
            transfer_op(TransferOp::Retry, "http://x/", "out_0"),
            "<retry_file_transfer>\n<project_url>http://x/</project_url>\n<filename>out_0</filename>\n</retry_file_transfer>"
        );
    }

    #[test]
    fn ops_parse_from_short_names_and_tags() {
        assert_eq!("detach_when_done".parse::<ProjectOp>(), Ok(ProjectOp::DetachWhenDone));
        assert_eq!("project_update".parse::<ProjectOp>(), Ok(ProjectOp::Update));
        assert_eq!("Suspend".parse::<ResultOp>(), Ok(ResultOp::Suspend));
        assert_eq!("abort".parse::<TransferOp>(), Ok(TransferOp::Abort));
        let error = "explode".parse::<ProjectOp>().expect_err("unknown op");
        assert_eq!(error.to_string(), "unknown project operation 'explode'");
    }
}
