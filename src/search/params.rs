//! `go` command construction.

/// Parameters for a `go` search command.
///
/// Every parameter is optional; omitted parameters contribute nothing to the
/// command line. Without a depth the search is `infinite` (curtail it with
/// `stop`). Time values are milliseconds, as on the wire.
///
/// # Example
///
/// ```ignore
/// let params = GoParams::new()
///     .depth(18)
///     .searchmoves(["e2e4", "d2d4"])
///     .extra("mate", "5");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GoParams {
    depth: Option<u32>,
    wtime: Option<u64>,
    btime: Option<u64>,
    winc: Option<u64>,
    binc: Option<u64>,
    movetime: Option<u64>,
    searchmoves: Vec<String>,
    nodes: Option<u64>,
    extra: Vec<(String, String)>,
}

impl GoParams {
    /// Parameters for an infinite search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search to a fixed depth in plies.
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// White's remaining clock time in milliseconds.
    pub fn wtime(mut self, millis: u64) -> Self {
        self.wtime = Some(millis);
        self
    }

    /// Black's remaining clock time in milliseconds.
    pub fn btime(mut self, millis: u64) -> Self {
        self.btime = Some(millis);
        self
    }

    /// White's increment per move in milliseconds.
    pub fn winc(mut self, millis: u64) -> Self {
        self.winc = Some(millis);
        self
    }

    /// Black's increment per move in milliseconds.
    pub fn binc(mut self, millis: u64) -> Self {
        self.binc = Some(millis);
        self
    }

    /// Search for exactly this long, in milliseconds.
    pub fn movetime(mut self, millis: u64) -> Self {
        self.movetime = Some(millis);
        self
    }

    /// Restrict the search to these root moves.
    pub fn searchmoves(mut self, moves: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.searchmoves = moves.into_iter().map(Into::into).collect();
        self
    }

    /// Search a fixed number of nodes.
    pub fn nodes(mut self, nodes: u64) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Append an arbitrary key/value pair to the command, verbatim.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Assemble the `go` command line.
    pub(crate) fn to_command(&self) -> String {
        let mut command = String::from("go");

        match self.depth {
            Some(depth) => push_pair(&mut command, "depth", depth),
            None => command.push_str(" infinite"),
        }
        if let Some(wtime) = self.wtime {
            push_pair(&mut command, "wtime", wtime);
        }
        if let Some(btime) = self.btime {
            push_pair(&mut command, "btime", btime);
        }
        if let Some(winc) = self.winc {
            push_pair(&mut command, "winc", winc);
        }
        if let Some(binc) = self.binc {
            push_pair(&mut command, "binc", binc);
        }
        if let Some(movetime) = self.movetime {
            push_pair(&mut command, "movetime", movetime);
        }
        if !self.searchmoves.is_empty() {
            command.push_str(" searchmoves");
            for m in &self.searchmoves {
                command.push(' ');
                command.push_str(m);
            }
        }
        if let Some(nodes) = self.nodes {
            push_pair(&mut command, "nodes", nodes);
        }
        for (key, value) in &self.extra {
            command.push(' ');
            command.push_str(key);
            command.push(' ');
            command.push_str(value);
        }

        command
    }
}

fn push_pair(command: &mut String, key: &str, value: impl std::fmt::Display) {
    command.push(' ');
    command.push_str(key);
    command.push(' ');
    command.push_str(&value.to_string());
}
