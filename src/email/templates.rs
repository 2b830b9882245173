pub fn render_password_reset(reset_url: &str, ttl_minutes: i64) -> String {
    let lifetime = describe_minutes(ttl_minutes);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Reset your CollegeHub password</h2>
    <p>Someone asked to reset the password for your CollegeHub account.</p>
    <p><a href="{reset_url}" style="display: inline-block; padding: 10px 20px; background: #2563eb; color: white; text-decoration: none; border-radius: 4px;">Choose a new password</a></p>
    <p style="color: #666; font-size: 14px;">The link works once and expires in {lifetime}. If you did not ask for this, ignore this email and your password stays the same.</p>
</body>
</html>"#
    )
}

fn describe_minutes(minutes: i64) -> String {
    match minutes {
        60 => "1 hour".to_string(),
        m if m % 60 == 0 => format!("{} hours", m / 60),
        1 => "1 minute".to_string(),
        m => format!("{m} minutes"),
    }
}
