//! Text summary of a decoded project.

use std::fmt;

use colored::Colorize;
use flpdump_core::{Channel, ChannelKind, Plugin, ProjectFile};

/// Terminal summary of a project: metadata, channels, then loaded inserts.
pub struct Summary<'a>(pub &'a ProjectFile);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.0;
        let project = &file.project;

        writeln!(f, "{}", "Project".bold())?;
        writeln!(f, "  Title:   {}", or_placeholder(&project.title))?;
        writeln!(f, "  Tempo:   {:.3} BPM", project.tempo_bpm())?;
        writeln!(f, "  Version: {}", or_placeholder(&project.version))?;
        for (label, value) in [
            ("Author", &project.author),
            ("Style", &project.style),
            ("URL", &project.url),
        ] {
            if !value.is_empty() {
                writeln!(f, "  {:<8} {}", format!("{label}:"), value)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", format!("Channels ({})", file.channels.len()).bold())?;
        for channel in &file.channels {
            writeln!(f, "  {}", channel_line(channel))?;
        }

        writeln!(f)?;
        writeln!(f, "{}", "Mixer".bold())?;
        for (index, insert) in file.mixer.iter().enumerate() {
            if insert.is_empty() {
                continue;
            }
            writeln!(
                f,
                "  Insert {} {}",
                index,
                or_placeholder(&insert.name).cyan()
            )?;
            for slot in insert.loaded_slots() {
                writeln!(f, "    slot {}: {}", slot.id, plugin_label(&slot.plugin))?;
            }
        }
        Ok(())
    }
}

fn channel_line(channel: &Channel) -> String {
    let kind = channel.kind();
    let head = format!(
        "#{} {} [{}]",
        channel.id,
        or_placeholder(&channel.name),
        kind.to_string().yellow()
    );
    let detail = match kind {
        ChannelKind::Sample => channel.sample_filename.clone(),
        ChannelKind::Automation => String::new(),
        ChannelKind::Plugin => plugin_label(&channel.plugin),
        ChannelKind::Unknown(_) if !channel.plugin.is_empty() => plugin_label(&channel.plugin),
        ChannelKind::Unknown(_) => channel.sample_filename.clone(),
    };
    if detail.is_empty() {
        head
    } else {
        format!("{head} {detail}")
    }
}

fn plugin_label(plugin: &Plugin) -> String {
    let extras: Vec<&str> = [plugin.filename.as_str(), plugin.vendor.as_str()]
        .into_iter()
        .filter(|value| !value.is_empty())
        .collect();
    let name = or_placeholder(&plugin.name).green().to_string();
    if extras.is_empty() {
        name
    } else {
        format!("{} ({})", name, extras.join(", "))
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { "(unnamed)" } else { value }
}

#[cfg(test)]
mod tests {
    use super::Summary;
    use flpdump_core::{Channel, Insert, Plugin, PluginKind, ProjectFile};

    fn sample_file() -> ProjectFile {
        let mut file = ProjectFile::default();
        file.project.title = "Night Drive".to_string();
        file.project.tempo = 128_500;
        file.project.version = "20.8.4".to_string();

        let mut kick = Channel::new(0);
        kick.name = "Kick".to_string();
        kick.sample_filename = "kick.wav".to_string();
        let mut lead = Channel::new(1);
        lead.name = "Lead".to_string();
        lead.channel_type = 2;
        lead.plugin = Plugin {
            kind: Some(PluginKind::VstExternal { code: 8 }),
            name: "Serum".to_string(),
            filename: "Serum_x64.dll".to_string(),
            vendor: "Xfer Records".to_string(),
        };
        let mut cutoff = Channel::new(2);
        cutoff.name = "Cutoff".to_string();
        cutoff.channel_type = 5;
        file.channels = vec![kick, lead, cutoff];

        let mut drums = Insert::new("Drums");
        drums.slots[3].plugin.name = "Pro-Q 3".to_string();
        file.mixer.push(drums);
        file.mixer.push(Insert::new("Spare"));
        file
    }

    #[test]
    fn summary_lists_project_channels_and_loaded_inserts() {
        colored::control::set_override(false);
        let text = Summary(&sample_file()).to_string();

        assert!(text.contains("Title:   Night Drive"));
        assert!(text.contains("Tempo:   128.500 BPM"));
        assert!(text.contains("Version: 20.8.4"));
        assert!(text.contains("#0 Kick [Sample] kick.wav"));
        assert!(text.contains("#1 Lead [VST] Serum (Serum_x64.dll, Xfer Records)"));
        assert!(text.contains("#2 Cutoff [Automation]\n"));
        assert!(text.contains("Insert 1 Drums"));
        assert!(text.contains("slot 3: Pro-Q 3"));
    }

    #[test]
    fn summary_skips_empty_inserts() {
        colored::control::set_override(false);
        let text = Summary(&sample_file()).to_string();
        assert!(!text.contains("Master"));
        assert!(!text.contains("Spare"));
    }

    #[test]
    fn summary_formats_into_any_writer() {
        use std::fmt::Write;

        colored::control::set_override(false);
        let mut out = String::new();
        assert!(write!(out, "{}", Summary(&sample_file())).is_ok());
        assert!(out.starts_with("Project\n"));
        assert!(out.ends_with("slot 3: Pro-Q 3\n"));
    }
}
