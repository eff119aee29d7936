//! Common test fixtures: design sheets as CSV text and helpers to convert them.
use kaiwa::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// The smallest useful flow: a greeting that leads to a menu where the conversation ends.
#[allow(dead_code)]
pub const WELCOME_MENU_CSV: &str = "\
Page Name,Intent Name,Trigger Type & Example,Bot Prompt,Next Page/Transition,Parameter Set,Webhook Action,Suggested Chips
Welcome,,Intent: User says 'hi',Hello!,Menu,,,
Menu,,Default,Pick an option,,,,
";

/// A study-assistant flow exercising every column.
///
/// Line numbers (header is line 1):
/// 2 StartPage, 3-5 Main Menu, 6 Grades, 7 Assignments, 8 Goodbye.
/// Line 5 targets `Fallback`, which no row defines.
#[allow(dead_code)]
pub const STUDY_HELP_CSV: &str = "\
Page Name,Intent Name,Trigger Type & Example,Bot Prompt,Next Page/Transition,Parameter Set,Webhook Action,Suggested Chips,Step,Next Step
StartPage,,Event: welcome,Hi! I'm your study assistant.,Main Menu,,,,1,2
Main Menu,,Intent: User says 'check my grades',What would you like to do?,Grades,topic=grades,,Check grades; View schedule,2,3
Main Menu,,Intent: User says 'what's due this week',What would you like to do?,Assignments,topic=assignments,fetch upcoming assignments,,,
Main Menu,,Default,What would you like to do?,Fallback,,,,,
Grades,Check_Grades,Intent: User says 'show grades',Here are your grades.,Goodbye,,check grades,Yes; No,3,4
Assignments,,Intent: User says 'thanks',Here is what's due.,Goodbye / Main Menu,,fetch upcoming assignments,,,
Goodbye,,Default,Goodbye!,N/A,,—,,4,
";

/// Rows with problems the converter reports but survives.
///
/// Line 3 has no bot prompt, line 4 has an unreadable trigger, and line 5
/// carries an empty parameter segment.
#[allow(dead_code)]
pub const MESSY_CSV: &str = "\
Page Name,Intent Name,Trigger Type & Example,Bot Prompt,Next Page/Transition,Parameter Set,Webhook Action,Suggested Chips
Home,,Intent: User says 'hello',Welcome back.,Profile,,,
Home,,Intent: User says 'help',,Profile,,,
Profile,,whenever the user waves,Here is your profile.,Settings,,,
Settings,,Default,Saved.,,\"user_id=123, , pref=dark\",save user settings,
";

/// A sheet without a Page Name column.
#[allow(dead_code)]
pub const NO_PAGE_COLUMN_CSV: &str = "\
Intent Name,Trigger Type & Example,Bot Prompt
,Default,Hello
";

/// Converts CSV text with default options, panicking on hard errors.
#[allow(dead_code)]
pub fn convert(csv: &str) -> Converted<Document> {
    Converter::default()
        .convert_str(csv)
        .expect("Failed to convert fixture sheet")
}

/// Writes `contents` to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_sheet(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture sheet");
    path
}
