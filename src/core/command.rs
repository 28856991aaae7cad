//! 命令系统：插件注册到宿主的命令
//!
//! 命令名是对宿主公开的契约，不能随意改名。

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// 打开文件路径快捷菜单
    Menu,
    /// 根据工作区和当前文件刷新窗口标题
    UpdateTitle,
}

impl Command {
    pub const ALL: [Command; 2] = [Command::Menu, Command::UpdateTitle];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Menu => "filePathBar.menu",
            Command::UpdateTitle => "windowTitleChanger.updateTitle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// Locale bundle key of the title shown by hosts that list commands.
    pub fn title_key(&self) -> &'static str {
        match self {
            Command::Menu => "filePathBar.menu.title",
            Command::UpdateTitle => "filePathBar.updateTitle.title",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
