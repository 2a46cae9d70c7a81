/*!

# Quick start

This example runs a maturity assessment end to end from the command line.

**Writing the questionnaire** Save the questions in a CSV file, say `questions.csv`.
The categories are the codes ending in `.0`, the questions below them are scored from 0 to 5:

```text
classe,pergunta
1.0,Governance
1.1,Is there a code of conduct?
1.2,Is the code of conduct reviewed every year?
2.0,Risk management
2.1,Are the risks of the company mapped?
2.2,Is there an owner for each risk?
```

**Answering** Run `matrad` with the questionnaire:

```bash
matrad -i questions.csv
```

The program first asks for the name, e-mail, company and phone of the participant.
All the fields are required. It then goes through each category and asks for a score
between 0 and 5 for every question. Pressing enter without typing anything keeps 0.

After confirming the submission, you should see something like:

```text
Thank you, Ana!
Answers submitted successfully!
  1.0 Governance: 80.0%
  2.0 Risk management: 40.0%
Workbook written to respostas_e_grafico.xlsx
```

**Scripting** The answers can be given in a file instead, which skips the questionnaire
screen. The intake fields can be passed as flags:

```bash
matrad -i questions.csv --answers answers.json \
  --name Ana --email ana@example.com --company ACME --phone 555-0100 \
  --chart radar.png --summary stdout
```

**Using the library** The scoring is available without the command line program:

```
use maturity_scoring::*;

let rows = vec![
    QuestionRow::new("1.0", "Governance"),
    QuestionRow::new("1.1", "Q1"),
    QuestionRow::new("1.2", "Q2"),
];
let mut answers = AnswerSet::new();
answers.insert("1.1", 5)?;
answers.insert("1.2", 3)?;

let (_, scores, series) = run_scoring(&rows, &answers)?;
assert_eq!(scores[0].percentage, 80.0);
assert_eq!(series.labels.len(), 2);
# Ok::<(), ScoringErrors>(())
```

See the [manual](../manual/index.html) for the input formats and the configuration file.

*/
