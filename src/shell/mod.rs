use std::io::{self, Stdout, Write};

use tracing::{debug, warn};

use crate::{
    builtins::{self, CommandContext, Flow},
    config::ShellConfig,
    error::ShellError,
    input::{LineReader, RustylineReader},
    jobs::JobTable,
    parser,
    process::{signal, Disposition, Launch, Launcher, Terminal, WaitPoller},
};

/// Why the read loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEnd {
    EndOfInput,
    ExitCommand,
}

/// One interactive session: terminal ownership, job table and the
/// read-parse-dispatch loop.
pub struct Shell<R: LineReader, W: Write> {
    terminal: Terminal,
    jobs: JobTable,
    reader: R,
    out: W,
    prompt: String,
    poller: WaitPoller,
}

impl Shell<RustylineReader, Stdout> {
    /// Sets up a session on standard input with a rustyline editor.
    pub fn new(config: ShellConfig) -> Result<Self, ShellError> {
        let reader = RustylineReader::new(config.history_limit)?;
        Shell::with_parts(config, reader, Terminal::stdin(), io::stdout())
    }
}

impl<R: LineReader, W: Write> Shell<R, W> {
    /// Claims the terminal if interactive and installs the shell's signal
    /// profile.
    pub fn with_parts(
        config: ShellConfig,
        reader: R,
        mut terminal: Terminal,
        out: W,
    ) -> Result<Self, ShellError> {
        terminal.take_control()?;
        Disposition::ShellOwnsTerminal.apply()?;
        debug!(
            interactive = terminal.is_interactive(),
            pgid = %terminal.shell_pgid(),
            ignored = ?signal::signal_names(),
            "session started"
        );

        Ok(Shell {
            terminal,
            jobs: JobTable::new(config.job_capacity),
            reader,
            out,
            prompt: config.prompt,
            poller: WaitPoller,
        })
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs until end of input. The `exit` builtin tears the session down
    /// and ends the process without returning; so does a failing line
    /// reader, before its error is returned.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let end = match self.run_loop() {
            Ok(end) => end,
            Err(e) => {
                self.teardown();
                return Err(e);
            }
        };
        match end {
            LoopEnd::EndOfInput => {
                writeln!(self.out)?;
                Ok(())
            }
            LoopEnd::ExitCommand => {
                self.teardown();
                std::process::exit(0);
            }
        }
    }

    pub fn run_loop(&mut self) -> Result<LoopEnd, ShellError> {
        loop {
            self.report_finished_jobs()?;

            let Some(line) = self.reader.read_line(&self.prompt)? else {
                return Ok(LoopEnd::EndOfInput);
            };

            if self.execute_line(&line)? == Flow::Exit {
                return Ok(LoopEnd::ExitCommand);
            }
        }
    }

    /// Prints a `Done` notice for every background job that exited since
    /// the last check.
    pub fn report_finished_jobs(&mut self) -> Result<(), ShellError> {
        for notice in self.jobs.update_status(&mut self.poller) {
            writeln!(self.out, "{}", notice)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Handles one raw input line. Command failures are reported on stderr
    /// and never end the session.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        self.reader.add_history(line);

        let trimmed = parser::trim_white(line);
        if trimmed.is_empty() {
            return Ok(Flow::Continue);
        }
        let args = parser::tokenize(trimmed);
        if args.is_empty() {
            return Ok(Flow::Continue);
        }

        let mut ctx = CommandContext {
            jobs: &mut self.jobs,
            history: &self.reader,
            out: &mut self.out,
        };
        match builtins::dispatch(&args, &mut ctx) {
            Some(Ok(flow)) => return Ok(flow),
            Some(Err(e)) => {
                eprintln!("{}: {}", args[0], e);
                return Ok(Flow::Continue);
            }
            None => {}
        }

        let launcher = Launcher::new(&self.terminal);
        match launcher.launch(args, &mut self.jobs, &mut self.out) {
            Ok(Launch::Foreground(status)) => debug!(?status, "foreground job done"),
            Ok(Launch::Background { job, pid }) => debug!(?job, %pid, "background job started"),
            Err(e) => eprintln!("lash: {}", e),
        }
        Ok(Flow::Continue)
    }

    /// Releases what the session holds: history is cleared and the
    /// terminal gets its saved modes back.
    pub fn teardown(&mut self) {
        self.reader.clear_history();
        if let Err(e) = self.terminal.restore_modes() {
            warn!(error = %e, "couldn't restore terminal modes");
        }
        self.prompt.clear();
        debug!("session torn down");
    }
}
