use atelie::backup::{BackupResult, ImportResult, SystemInfo};
use atelie::models::{ClassSchedule, Payment, Student, Task};
use atelie::reports::{FinancialReport, FinancialStatus, Stats};
use clap::ValueEnum;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs or counts)
    pub quiet: bool,
}

/// Formats an amount as Brazilian currency (`R$ 1.234,56`)
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, frac)
}

/// Prints a list of students in the specified format
pub fn print_students(students: &[Student], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if students.is_empty() {
                if !config.quiet {
                    println!("No students found.");
                }
                return;
            }
            if config.quiet {
                for student in students {
                    println!("{}", student.id);
                }
                return;
            }
            let max_id = students.iter().map(|s| s.id.len()).max().unwrap_or(2);
            let max_nome = students.iter().map(|s| s.nome.len()).max().unwrap_or(4);
            println!(
                "{:<id_w$}  {:<nome_w$}  {:<8}  {:>12}  {:<10}  CIDADE",
                "ID",
                "NOME",
                "STATUS",
                "MENSALIDADE",
                "VENCIMENTO",
                id_w = max_id,
                nome_w = max_nome,
            );
            for student in students {
                println!(
                    "{:<id_w$}  {:<nome_w$}  {:<8}  {:>12}  {:<10}  {}",
                    student.id,
                    student.nome,
                    student.status.to_string(),
                    format_currency(student.mensalidade),
                    student.next_payment_due.format("%Y-%m-%d").to_string(),
                    student.cidade,
                    id_w = max_id,
                    nome_w = max_nome,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(students).unwrap());
        }
    }
}

/// Prints a single student in the specified format
pub fn print_student(student: &Student, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", student.id);
                return;
            }
            println!("ID:          {}", student.id);
            println!("Nome:        {}", student.nome);
            println!("Status:      {}", student.status);
            println!("Mensalidade: {}", format_currency(student.mensalidade));
            println!("Cidade:      {}", student.cidade);
            println!("Email:       {}", student.email);
            println!("Telefone:    {}", student.telefone);
            match student.nasc {
                Some(nasc) => println!("Nascimento:  {}", nasc),
                None => println!("Nascimento:  -"),
            }
            println!("Vencimento:  {}", student.vencimento_mensalidade);
            match student.last_payment_date {
                Some(date) => println!("Último pag.: {}", date),
                None => println!("Último pag.: nunca"),
            }
            println!("Próximo venc.: {}", student.next_payment_due);
            println!(
                "Registros:   {} pagamentos, {} aulas, {} tarefas",
                student.payments.len(),
                student.class_schedule.len(),
                student.tasks.len()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(student).unwrap());
        }
    }
}

/// Prints a list of payments in the specified format
pub fn print_payments(payments: &[Payment], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if payments.is_empty() {
                if !config.quiet {
                    println!("No payments found.");
                }
                return;
            }
            if config.quiet {
                for payment in payments {
                    println!("{}", payment.id);
                }
                return;
            }
            let max_id = payments.iter().map(|p| p.id.len()).max().unwrap_or(2);
            println!(
                "{:<id_w$}  {:>12}  {:<10}  {:<10}  {:<13}  STATUS",
                "ID",
                "VALOR",
                "PAGO EM",
                "VENCIMENTO",
                "FORMA",
                id_w = max_id,
            );
            for payment in payments {
                println!(
                    "{:<id_w$}  {:>12}  {:<10}  {:<10}  {:<13}  {}",
                    payment.id,
                    format_currency(payment.amount),
                    payment.payment_date.format("%Y-%m-%d").to_string(),
                    payment.due_date.format("%Y-%m-%d").to_string(),
                    payment.payment_method.to_string(),
                    payment.status,
                    id_w = max_id,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(payments).unwrap());
        }
    }
}

/// Prints a student's financial status in the specified format
pub fn print_financial_status(status: &FinancialStatus, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", status.status);
                return;
            }
            println!("Aluno:          {}", status.student_id);
            println!("Mensalidade:    {}", format_currency(status.mensalidade));
            println!("Pago no mês:    {}", format_currency(status.total_pago_mes));
            println!("Valor devido:   {}", format_currency(status.valor_devido));
            println!("Situação:       {}", status.status);
            println!("Próximo venc.:  {}", status.proximo_vencimento);
            println!(
                "Pagamentos:     {} no mês, {} no total",
                status.pagamentos_mes.len(),
                status.historico_completo.len()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(status).unwrap());
        }
    }
}

/// Prints a list of tasks in the specified format
pub fn print_tasks(tasks: &[Task], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if tasks.is_empty() {
                if !config.quiet {
                    println!("No tasks found.");
                }
                return;
            }
            if config.quiet {
                for task in tasks {
                    println!("{}", task.id);
                }
                return;
            }
            let max_id = tasks.iter().map(|t| t.id.len()).max().unwrap_or(2);
            let max_title = tasks.iter().map(|t| t.title.len()).max().unwrap_or(6);
            println!(
                "{:<id_w$}  {:<title_w$}  {:<10}  STATUS",
                "ID",
                "TÍTULO",
                "DATA",
                id_w = max_id,
                title_w = max_title,
            );
            for task in tasks {
                println!(
                    "{:<id_w$}  {:<title_w$}  {:<10}  {}",
                    task.id,
                    task.title,
                    task.date.format("%Y-%m-%d").to_string(),
                    task.status,
                    id_w = max_id,
                    title_w = max_title,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(tasks).unwrap());
        }
    }
}

/// Prints a list of class slots in the specified format
pub fn print_schedules(slots: &[ClassSchedule], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if slots.is_empty() {
                if !config.quiet {
                    println!("No class slots found.");
                }
                return;
            }
            if config.quiet {
                for slot in slots {
                    println!("{}", slot.id);
                }
                return;
            }
            let max_id = slots.iter().map(|s| s.id.len()).max().unwrap_or(2);
            println!(
                "{:<id_w$}  {:<14}  {:<5}  {:>5}  {:<14}  ATIVA",
                "ID",
                "DIA",
                "HORA",
                "MIN",
                "MATÉRIA",
                id_w = max_id,
            );
            for slot in slots {
                println!(
                    "{:<id_w$}  {:<14}  {:<5}  {:>5}  {:<14}  {}",
                    slot.id,
                    slot.day_name(),
                    slot.time,
                    slot.duration,
                    slot.subject,
                    if slot.is_active { "sim" } else { "não" },
                    id_w = max_id,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(slots).unwrap());
        }
    }
}

/// Prints the headline stats in the specified format
pub fn print_stats(stats: &Stats, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", stats.total);
                return;
            }
            println!("Total de alunos:  {}", stats.total);
            println!("Ativos:           {}", stats.ativos);
            println!("Pendentes:        {}", stats.pendentes);
            println!("Trancados:        {}", stats.trancados);
            println!("Receita mensal:   {}", format_currency(stats.receita));
            println!("Vencidas:         {}", stats.vencidas);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stats).unwrap());
        }
    }
}

/// Prints the financial report in the specified format
pub fn print_financial_report(report: &FinancialReport, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            println!("Receita total:      {}", format_currency(report.receita_total));
            println!("Receita vencida:    {}", format_currency(report.receita_vencida));
            println!("Receita pendente:   {}", format_currency(report.receita_pendente));
            println!("Total de pagamentos: {}", format_currency(report.total_pagamentos));
            println!("Alunos em dia:      {}", report.alunos_em_dia);
            println!("Alunos vencidos:    {}", report.alunos_vencidos);
            println!("Inadimplência:      {:.1}%", report.taxa_inadimplencia);
            println!("Taxa de pagamento:  {:.1}%", report.taxa_pagamento);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report).unwrap());
        }
    }
}

/// Prints backup keys in the specified format
pub fn print_backups(backups: &[String], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if backups.is_empty() {
                if !config.quiet {
                    println!("No backups found.");
                }
                return;
            }
            for key in backups {
                println!("{}", key);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(backups).unwrap());
        }
    }
}

/// Prints the result of a backup creation
pub fn print_backup_result(result: &BackupResult, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", result.key);
                return;
            }
            println!("Backup criado: {}", result.key);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result).unwrap());
        }
    }
}

/// Prints the result of an import or restore
pub fn print_import_result(result: &ImportResult, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", result.imported_count);
                return;
            }
            println!("{}", result.message);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result).unwrap());
        }
    }
}

/// Prints storage information
pub fn print_system_info(info: &SystemInfo, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            println!("Armazenamento: {}", info.storage_type);
            println!("Atualizado em: {}", info.last_updated);
            println!("Versão:        {}", info.version);
            println!("Alunos:        {}", info.total_students);
            println!("Tamanho:       {}", info.storage_size);
            println!("Backups:       {}", info.backups);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(info).unwrap());
        }
    }
}

/// Prints a simple success message (for operations that don't return data)
pub fn print_success(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if !config.quiet {
                println!("{}", message);
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(
                    &serde_json::json!({"status": "ok", "message": message})
                )
                .unwrap()
            );
        }
    }
}
